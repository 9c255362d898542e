use std::error::Error;
use std::fmt;

use ndarray::{Array1, Array2, ArrayView1};

/// A value the generalized `dot`/`transpose` helpers accept: either a flat
/// vector or a 2-D matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

/// Result of the generalized `dot`
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Scalar(f64),
    Matrix(Array2<f64>),
}

impl Operand {
    pub fn is_matrix(&self) -> bool {
        matches!(self, Operand::Matrix(_))
    }

    /// Swap rows and columns. Vectors pass through unchanged.
    pub fn transpose(&self) -> Operand {
        match self {
            Operand::Vector(v) => Operand::Vector(v.clone()),
            Operand::Matrix(m) => Operand::Matrix(transpose_matrix(m)),
        }
    }
}

impl From<Array1<f64>> for Operand {
    fn from(v: Array1<f64>) -> Self {
        Operand::Vector(v)
    }
}

impl From<Array2<f64>> for Operand {
    fn from(m: Array2<f64>) -> Self {
        Operand::Matrix(m)
    }
}

impl Product {
    pub fn into_scalar(self) -> Option<f64> {
        match self {
            Product::Scalar(s) => Some(s),
            Product::Matrix(_) => None,
        }
    }

    pub fn into_matrix(self) -> Option<Array2<f64>> {
        match self {
            Product::Scalar(_) => None,
            Product::Matrix(m) => Some(m),
        }
    }
}

/// Owned transpose in standard (row-major) layout
pub fn transpose_matrix(m: &Array2<f64>) -> Array2<f64> {
    m.t().as_standard_layout().into_owned()
}

/// Elementwise multiply then sum.
pub fn dot_vectors(v: ArrayView1<f64>, w: ArrayView1<f64>) -> Result<f64, LinalgError> {
    if v.len() != w.len() {
        return Err(LinalgError::LengthMismatch {
            left: v.len(),
            right: w.len(),
        });
    }
    Ok(v.dot(&w))
}

/// Standard matrix product: cell (i, j) is row i of `m` dotted with column j of `n`.
pub fn dot_matrices(m: &Array2<f64>, n: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    if m.ncols() != n.nrows() {
        return Err(LinalgError::DimensionMismatch {
            left: m.dim(),
            right: n.dim(),
        });
    }
    Ok(m.dot(n))
}

/// Generalized dot: vector·vector gives a scalar, matrix·matrix a matrix.
pub fn dot(m: &Operand, n: &Operand) -> Result<Product, LinalgError> {
    match (m, n) {
        (Operand::Vector(v), Operand::Vector(w)) => {
            dot_vectors(v.view(), w.view()).map(Product::Scalar)
        }
        (Operand::Matrix(a), Operand::Matrix(b)) => dot_matrices(a, b).map(Product::Matrix),
        _ => Err(LinalgError::MixedOperands),
    }
}

/// Build a `rows x cols` matrix, calling `fill` once per cell.
///
/// Cells are produced in row-major order, but `fill` takes no index and
/// should not rely on that order. `fill_matrix(0, 0, ..)` is empty.
pub fn fill_matrix<F>(rows: usize, cols: usize, fill: F) -> Array2<f64>
where
    F: FnMut() -> f64,
{
    Array2::from_shape_simple_fn((rows, cols), fill)
}

/// `fill_matrix` with the constant-zero generator
pub fn zeros_matrix(rows: usize, cols: usize) -> Array2<f64> {
    fill_matrix(rows, cols, || 0.0)
}

/// Recombine two factor matrices into the dense approximation `A * B^T`.
pub fn build_completed_matrix(
    factor_a: &Array2<f64>,
    factor_b: &Array2<f64>,
) -> Result<Array2<f64>, LinalgError> {
    dot_matrices(factor_a, &transpose_matrix(factor_b))
}

/// Misuse of the linear-algebra helpers
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    LengthMismatch { left: usize, right: usize },
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    MixedOperands,
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgError::LengthMismatch { left, right } => {
                write!(f, "Vector length mismatch: {} vs {}", left, right)
            }
            LinalgError::DimensionMismatch { left, right } => write!(
                f,
                "Cannot multiply {}x{} by {}x{}",
                left.0, left.1, right.0, right.1
            ),
            LinalgError::MixedOperands => {
                write!(f, "dot requires two vectors or two matrices")
            }
        }
    }
}

impl Error for LinalgError {}
