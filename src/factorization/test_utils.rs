/// Shared fixtures for factorization tests
use ndarray::array;

use crate::matrix::TargetMatrix;

/// The classic 5x4 user-item ratings table, zeros marking unrated items
pub fn ratings_matrix() -> TargetMatrix {
    TargetMatrix::new(array![
        [5.0, 3.0, 0.0, 1.0],
        [4.0, 0.0, 0.0, 1.0],
        [1.0, 1.0, 0.0, 5.0],
        [1.0, 0.0, 0.0, 4.0],
        [0.0, 1.0, 5.0, 4.0],
    ])
    .unwrap()
}

/// Fully observed outer product [1, 2]^T [1, 2]
pub fn rank_one_matrix() -> TargetMatrix {
    TargetMatrix::new(array![[1.0, 2.0], [2.0, 4.0]]).unwrap()
}

pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
