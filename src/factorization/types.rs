use std::error::Error;
use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::linalg::{build_completed_matrix, LinalgError};

// ============================================================================
// Configuration
// ============================================================================

/// How the two factor entries at the same latent index are updated for one
/// observed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GradientStep {
    /// Read `A[i][k]` and `B[j][k]` first, then write both.
    #[default]
    Simultaneous,
    /// Write `A[i][k]` first; the `B[j][k]` update reads the new `A[i][k]`.
    Sequential,
}

/// Hyperparameters for one factorization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorizationConfig {
    /// Number of latent features (K)
    pub rank: usize,
    /// Iteration cap
    pub max_iter: usize,
    pub learning_rate: f64,
    pub regularization: f64,
    /// Stop once the regularized loss falls below this value
    pub threshold: f64,
    /// Seed for the uniform initial fill; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub gradient_step: GradientStep,
}

impl Default for FactorizationConfig {
    fn default() -> Self {
        Self {
            rank: 2,
            max_iter: 5000,
            learning_rate: 0.0002,
            regularization: 0.02,
            threshold: 0.001,
            seed: None,
            gradient_step: GradientStep::Simultaneous,
        }
    }
}

impl FactorizationConfig {
    /// Default hyperparameters with the given rank
    pub fn with_rank(rank: usize) -> Self {
        Self {
            rank,
            ..Default::default()
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn regularization(mut self, regularization: f64) -> Self {
        self.regularization = regularization;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn gradient_step(mut self, gradient_step: GradientStep) -> Self {
        self.gradient_step = gradient_step;
        self
    }

    pub fn validate(&self) -> Result<(), FactorizationError> {
        if self.rank == 0 {
            return Err(FactorizationError::InvalidRank(self.rank));
        }
        if self.max_iter == 0 {
            return Err(FactorizationError::InvalidIterations(self.max_iter));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(FactorizationError::InvalidHyperparameter {
                name: "learning_rate",
                value: self.learning_rate,
            });
        }
        if !(self.regularization.is_finite() && self.regularization > 0.0) {
            return Err(FactorizationError::InvalidHyperparameter {
                name: "regularization",
                value: self.regularization,
            });
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(FactorizationError::InvalidHyperparameter {
                name: "threshold",
                value: self.threshold,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Factors of a target matrix R: R ≈ A * B^T
#[derive(Debug, Clone)]
pub struct Factorization {
    /// rows(R) x rank
    pub factor_a: Array2<f64>,
    /// cols(R) x rank
    pub factor_b: Array2<f64>,
    /// Regularized loss after the last completed iteration
    pub loss: f64,
    /// Iterations actually run
    pub iterations: usize,
    /// Loss dropped below the threshold before the cap
    pub converged: bool,
    /// Stopped by an external cancellation flag
    pub cancelled: bool,
}

impl Factorization {
    pub fn into_factors(self) -> (Array2<f64>, Array2<f64>) {
        (self.factor_a, self.factor_b)
    }

    /// Dense approximation `A * B^T`
    pub fn completed_matrix(&self) -> Result<Array2<f64>, FactorizationError> {
        Ok(build_completed_matrix(&self.factor_a, &self.factor_b)?)
    }

    pub fn rank(&self) -> usize {
        self.factor_a.ncols()
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised before any factorization work starts, plus arithmetic
/// failures from the linear-algebra helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum FactorizationError {
    EmptyMatrix,
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidValue {
        row: usize,
        col: usize,
        value: f64,
    },
    InvalidRank(usize),
    InvalidIterations(usize),
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
    },
    Arithmetic(LinalgError),
}

impl fmt::Display for FactorizationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FactorizationError::EmptyMatrix => write!(f, "Target matrix is empty"),
            FactorizationError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} columns, expected {}",
                row, found, expected
            ),
            FactorizationError::InvalidValue { row, col, value } => write!(
                f,
                "Invalid value {} at ({}, {}): entries must be finite and non-negative",
                value, row, col
            ),
            FactorizationError::InvalidRank(rank) => {
                write!(f, "Invalid rank {} (must be at least 1)", rank)
            }
            FactorizationError::InvalidIterations(n) => {
                write!(f, "Invalid iteration count {} (must be at least 1)", n)
            }
            FactorizationError::InvalidHyperparameter { name, value } => {
                write!(f, "Invalid hyperparameter {} = {}", name, value)
            }
            FactorizationError::Arithmetic(e) => write!(f, "Arithmetic error: {}", e),
        }
    }
}

impl Error for FactorizationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FactorizationError::Arithmetic(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LinalgError> for FactorizationError {
    fn from(e: LinalgError) -> Self {
        FactorizationError::Arithmetic(e)
    }
}
