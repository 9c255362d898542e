use std::ops::Index;

use ndarray::Array2;

use crate::factorization::FactorizationError;

/// Validated target matrix. A cell is observed when its value is > 0; zero
/// marks a missing entry, not a rating of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetMatrix {
    data: Array2<f64>,
    rows: usize,
    cols: usize,
}

impl TargetMatrix {
    pub fn new(data: Array2<f64>) -> Result<TargetMatrix, FactorizationError> {
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(FactorizationError::EmptyMatrix);
        }
        for ((row, col), &value) in data.indexed_iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(FactorizationError::InvalidValue { row, col, value });
            }
        }
        Ok(TargetMatrix { data, rows, cols })
    }

    /// Build from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<TargetMatrix, FactorizationError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(FactorizationError::EmptyMatrix);
        }
        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != n_cols)
            .map(|(i, r)| (i, r.len()))
        {
            return Err(FactorizationError::RaggedRow {
                row,
                expected: n_cols,
                found,
            });
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|_| {
            FactorizationError::RaggedRow {
                row: 0,
                expected: n_cols,
                found: 0,
            }
        })?;
        TargetMatrix::new(data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn is_observed(&self, row: usize, col: usize) -> bool {
        self.get(row, col).map_or(false, |v| v > 0.0)
    }

    /// Observed cells as `(row, col, value)` in row-major order
    pub fn observed_cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data
            .indexed_iter()
            .filter(|(_, &value)| value > 0.0)
            .map(|((i, j), &value)| (i, j, value))
    }

    pub fn observed_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0.0).count()
    }
}

impl Index<(usize, usize)> for TargetMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index]
    }
}

impl TryFrom<Vec<Vec<f64>>> for TargetMatrix {
    type Error = FactorizationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        TargetMatrix::from_rows(rows)
    }
}

impl TryFrom<Array2<f64>> for TargetMatrix {
    type Error = FactorizationError;

    fn try_from(data: Array2<f64>) -> Result<Self, Self::Error> {
        TargetMatrix::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_matrix() {
        let matrix = TargetMatrix::new(array![[1.0, 0.0], [3.0, 4.0]]).unwrap();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 2);
        assert_eq!(matrix[(1, 0)], 3.0);
    }

    #[test]
    fn test_get() {
        let matrix = TargetMatrix::new(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(matrix.get(0, 1), Some(2.0));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 2), None);
    }

    #[test]
    fn test_from_rows() {
        let matrix = TargetMatrix::from_rows(vec![vec![5.0, 3.0, 0.0], vec![4.0, 0.0, 1.0]]).unwrap();
        assert_eq!(matrix.data(), &array![[5.0, 3.0, 0.0], [4.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(
            TargetMatrix::from_rows(vec![]),
            Err(FactorizationError::EmptyMatrix)
        );
        assert_eq!(
            TargetMatrix::from_rows(vec![vec![], vec![]]),
            Err(FactorizationError::EmptyMatrix)
        );
        assert_eq!(
            TargetMatrix::new(Array2::zeros((0, 3))),
            Err(FactorizationError::EmptyMatrix)
        );
    }

    #[test]
    fn test_ragged_is_rejected() {
        let err = TargetMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0]]).unwrap_err();
        assert_eq!(
            err,
            FactorizationError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            TargetMatrix::new(array![[1.0, -1.0]]),
            Err(FactorizationError::InvalidValue { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            TargetMatrix::new(array![[f64::NAN], [1.0]]),
            Err(FactorizationError::InvalidValue { row: 0, col: 0, .. })
        ));
    }

    #[test]
    fn test_observed_cells() {
        let matrix = TargetMatrix::new(array![[5.0, 0.0], [0.0, 2.5]]).unwrap();
        let cells: Vec<_> = matrix.observed_cells().collect();
        assert_eq!(cells, vec![(0, 0, 5.0), (1, 1, 2.5)]);
        assert_eq!(matrix.observed_count(), 2);
        assert!(matrix.is_observed(0, 0));
        assert!(!matrix.is_observed(0, 1));
        assert!(!matrix.is_observed(9, 9));
    }
}
