pub mod sgd;
pub mod types;
pub mod update_rules;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports for convenience
pub use sgd::{run_factorization, SgdFactorizer};
pub use types::{Factorization, FactorizationConfig, FactorizationError, GradientStep};
