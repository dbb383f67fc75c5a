use crate::error::{FracdimError, Result};

/// Delay embedding of a scalar series into `dimension`-dimensional points.
///
/// Point `i` is the window `row[i..i + dimension]`, so a row of length `n` yields
/// `n - dimension + 1` overlapping points.
pub fn row_to_points(row: &[f64], dimension: usize) -> Result<Vec<Vec<f64>>> {
    if dimension == 0 || row.len() < dimension {
        return Err(FracdimError::EmbeddingTooShort {
            len: row.len(),
            dimension,
        });
    }
    Ok(row.windows(dimension).map(<[f64]>::to_vec).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<f64> {
        (1..=n).map(|v| v as f64).collect()
    }

    #[test]
    fn test_standard_case() {
        let row = series(10);
        let points = row_to_points(&row, 3).unwrap();
        assert_eq!(points.len(), 8);
        assert_eq!(points[0][0], row[0]);
        assert_eq!(points[1][0], row[1]);
        assert_eq!(points[0][1], row[1]);
        assert_eq!(points[7][2], row[9]);
    }

    #[test]
    fn test_small_datasets() {
        let points = row_to_points(&series(6), 5).unwrap();
        assert_eq!(points, vec![vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![2.0, 3.0, 4.0, 5.0, 6.0]]);

        let points = row_to_points(&series(5), 5).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0][4], 5.0);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            row_to_points(&series(4), 5),
            Err(FracdimError::EmbeddingTooShort { len: 4, dimension: 5 })
        );
        assert!(row_to_points(&series(4), 0).is_err());
    }
}
