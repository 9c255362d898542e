use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::{Distribution, Uniform};

use super::types::{Factorization, FactorizationConfig, FactorizationError};
use super::update_rules::{total_loss, update_pass};
use crate::linalg::fill_matrix;
use crate::matrix::TargetMatrix;

/// Progress is logged at debug level every this many iterations
const LOG_EVERY: usize = 500;

/// Stochastic gradient descent factorizer: R ≈ A * B^T
///
/// Each iteration runs one gradient step per observed cell, then measures the
/// regularized loss and stops once it falls below `config.threshold`.
#[derive(Debug, Clone)]
pub struct SgdFactorizer {
    pub config: FactorizationConfig,
}

impl SgdFactorizer {
    pub fn new(rank: usize) -> Self {
        Self {
            config: FactorizationConfig::with_rank(rank),
        }
    }

    pub fn with_config(config: FactorizationConfig) -> Self {
        Self { config }
    }

    /// Initialize both factors with Uniform[0, 1) draws from a `StdRng`
    /// seeded by `config.seed`, or from OS entropy when unset.
    pub fn fit(&self, target: &TargetMatrix) -> Result<Factorization, FactorizationError> {
        self.fit_with_cancel(target, None)
    }

    pub fn fit_with_cancel(
        &self,
        target: &TargetMatrix,
        cancel: Option<&AtomicBool>,
    ) -> Result<Factorization, FactorizationError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let uniform = Uniform::new(0.0, 1.0);
        run_factorization(target, &self.config, || uniform.sample(&mut rng), cancel)
    }

    /// Initialize both factors from `fill` instead of the seeded RNG
    pub fn fit_with_fill<F>(
        &self,
        target: &TargetMatrix,
        fill: F,
    ) -> Result<Factorization, FactorizationError>
    where
        F: FnMut() -> f64,
    {
        run_factorization(target, &self.config, fill, None)
    }
}

/// Run the optimization loop.
///
/// A (rows x rank) is filled before B (cols x rank), both row-major, so a
/// stateful `fill` sees A's cells first. Non-convergence is not an error:
/// the current factors are returned with `converged == false`.
pub fn run_factorization<F>(
    target: &TargetMatrix,
    config: &FactorizationConfig,
    mut fill: F,
    cancel: Option<&AtomicBool>,
) -> Result<Factorization, FactorizationError>
where
    F: FnMut() -> f64,
{
    config.validate()?;

    let mut factor_a = fill_matrix(target.rows(), config.rank, &mut fill);
    let mut factor_b = fill_matrix(target.cols(), config.rank, &mut fill);

    debug!(
        "Factorizing {}x{} matrix ({} observed) at rank {}",
        target.rows(),
        target.cols(),
        target.observed_count(),
        config.rank
    );

    let mut loss = total_loss(target, &factor_a, &factor_b, config.regularization);
    let mut iterations = 0;
    let mut converged = false;
    let mut cancelled = false;

    for iter in 0..config.max_iter {
        if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
            warn!("Factorization cancelled after {} iterations", iterations);
            cancelled = true;
            break;
        }

        update_pass(target, &mut factor_a, &mut factor_b, config);
        loss = total_loss(target, &factor_a, &factor_b, config.regularization);
        iterations = iter + 1;

        if iter % LOG_EVERY == 0 {
            debug!("Iteration {}: loss = {:.6}", iter, loss);
        }

        if loss < config.threshold {
            converged = true;
            break;
        }
    }

    if converged {
        info!("Converged after {} iterations, loss = {:.6}", iterations, loss);
    } else if !cancelled {
        info!(
            "Reached iteration cap {}, final loss = {:.6}",
            config.max_iter, loss
        );
    }

    Ok(Factorization {
        factor_a,
        factor_b,
        loss,
        iterations,
        converged,
        cancelled,
    })
}
