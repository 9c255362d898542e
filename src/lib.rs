//! Matrix factorization by stochastic gradient descent.
//!
//! A sparse, non-negative target matrix R (zero marks a missing entry) is
//! approximated as `A * B^T`, where A is `rows x K` and B is `cols x K`.
//!
//! ```no_run
//! use matrix_factorization::{factorize, TargetMatrix};
//!
//! let target = TargetMatrix::from_rows(vec![
//!     vec![5.0, 3.0, 0.0, 1.0],
//!     vec![4.0, 0.0, 0.0, 1.0],
//!     vec![0.0, 1.0, 5.0, 4.0],
//! ])?;
//! let result = factorize(&target, 2)?;
//! let completed = result.completed_matrix()?;
//! # Ok::<(), matrix_factorization::FactorizationError>(())
//! ```
use std::sync::atomic::AtomicBool;

pub mod config;
pub mod factorization;
pub mod linalg;
pub mod matrix;

pub use factorization::{
    Factorization, FactorizationConfig, FactorizationError, GradientStep, SgdFactorizer,
};
pub use linalg::{build_completed_matrix, dot, fill_matrix, transpose_matrix, LinalgError, Operand};
pub use matrix::TargetMatrix;

/// Factorize with default hyperparameters (5000 iterations, learning rate
/// 0.0002, regularization 0.02, threshold 0.001) and an unseeded RNG.
pub fn factorize(target: &TargetMatrix, rank: usize) -> Result<Factorization, FactorizationError> {
    SgdFactorizer::new(rank).fit(target)
}

pub fn factorize_with_config(
    target: &TargetMatrix,
    config: &FactorizationConfig,
) -> Result<Factorization, FactorizationError> {
    SgdFactorizer::with_config(config.clone()).fit(target)
}

/// Factorize with a caller-supplied generator for the initial factor values.
pub fn factorize_with_fill<F>(
    target: &TargetMatrix,
    config: &FactorizationConfig,
    fill: F,
) -> Result<Factorization, FactorizationError>
where
    F: FnMut() -> f64,
{
    factorization::run_factorization(target, config, fill, None)
}

/// Like `factorize_with_config`, but stops early once `cancel` is set.
pub fn factorize_with_cancel(
    target: &TargetMatrix,
    config: &FactorizationConfig,
    cancel: &AtomicBool,
) -> Result<Factorization, FactorizationError> {
    SgdFactorizer::with_config(config.clone()).fit_with_cancel(target, Some(cancel))
}
