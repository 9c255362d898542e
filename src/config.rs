use std::error::Error;
use std::fs::File;

use ndarray::{array, Array2};
use ndarray_npy::ReadNpyExt;

use crate::factorization::FactorizationConfig;
use crate::matrix::TargetMatrix;

/// Placeholder for the built-in ratings table instead of a `.npy` path
pub const DEMO_SOURCE: &str = "demo";

/// Command-line configuration for the demo binary
pub struct Config {
    target: TargetMatrix,
    source: String,
    factorization: FactorizationConfig,
}

impl Config {
    /// constructor
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run -- data/ratings.npy 2 5000 42
    /// $ cargo run -- demo 3
    /// ```
    /// args:
    /// 0: program name
    /// 1: matrix path, or `demo` (default)
    /// 2: rank (default 2)
    /// 3: iteration cap (default 5000)
    /// 4: seed (optional)
    pub fn new(mut args: impl Iterator<Item = String>) -> Result<Config, Box<dyn Error>> {
        args.next();
        let source = args.next().unwrap_or_else(|| DEMO_SOURCE.to_string());
        let target = if source == DEMO_SOURCE {
            TargetMatrix::new(demo_matrix())?
        } else {
            let reader = File::open(&source)?;
            TargetMatrix::new(Array2::<f64>::read_npy(reader)?)?
        };

        let mut factorization = FactorizationConfig::default();
        if let Some(rank) = args.next() {
            factorization.rank = rank.parse::<usize>()?;
        }
        if let Some(max_iter) = args.next() {
            factorization.max_iter = max_iter.parse::<usize>()?;
        }
        if let Some(seed) = args.next() {
            factorization.seed = Some(seed.parse::<u64>()?);
        }
        factorization.validate()?;

        Ok(Config {
            target,
            source,
            factorization,
        })
    }

    pub fn get_target(&self) -> &TargetMatrix {
        &self.target
    }

    pub fn get_source(&self) -> &str {
        &self.source
    }

    pub fn get_factorization(&self) -> &FactorizationConfig {
        &self.factorization
    }
}

fn demo_matrix() -> Array2<f64> {
    array![
        [5.0, 3.0, 0.0, 1.0],
        [4.0, 0.0, 0.0, 1.0],
        [1.0, 1.0, 0.0, 5.0],
        [1.0, 0.0, 0.0, 4.0],
        [0.0, 1.0, 5.0, 4.0],
    ]
}
