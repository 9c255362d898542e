use ndarray::{Array2, Zip};

use super::types::{FactorizationConfig, GradientStep};
use crate::matrix::TargetMatrix;

/// Current approximation of cell (i, j): row i of A dotted with row j of B
pub fn predict(a: &Array2<f64>, b: &Array2<f64>, i: usize, j: usize) -> f64 {
    a.row(i).dot(&b.row(j))
}

/// One stochastic gradient step on observed cell (i, j). Returns the error
/// measured before the step.
///
///   A[i][k] += lr * (2 * e * B[j][k] - reg * A[i][k])
///   B[j][k] += lr * (2 * e * A[i][k] - reg * B[j][k])
pub fn gradient_step(
    a: &mut Array2<f64>,
    b: &mut Array2<f64>,
    i: usize,
    j: usize,
    observed: f64,
    config: &FactorizationConfig,
) -> f64 {
    let error = observed - predict(a, b, i, j);
    let lr = config.learning_rate;
    let reg = config.regularization;

    let rows = Zip::from(a.row_mut(i)).and(b.row_mut(j));
    match config.gradient_step {
        GradientStep::Simultaneous => rows.for_each(|a_ik, b_jk| {
            let (a_old, b_old) = (*a_ik, *b_jk);
            *a_ik = a_old + lr * (2.0 * error * b_old - reg * a_old);
            *b_jk = b_old + lr * (2.0 * error * a_old - reg * b_old);
        }),
        GradientStep::Sequential => rows.for_each(|a_ik, b_jk| {
            *a_ik += lr * (2.0 * error * *b_jk - reg * *a_ik);
            *b_jk += lr * (2.0 * error * *a_ik - reg * *b_jk);
        }),
    }

    error
}

/// One full pass over every observed cell in row-major order
pub fn update_pass(
    target: &TargetMatrix,
    a: &mut Array2<f64>,
    b: &mut Array2<f64>,
    config: &FactorizationConfig,
) {
    for (i, j, observed) in target.observed_cells() {
        gradient_step(a, b, i, j, observed, config);
    }
}

/// Regularized loss over observed cells:
///   sum of e^2 + (reg / 2) * sum_k (A[i][k]^2 + B[j][k]^2)
pub fn total_loss(
    target: &TargetMatrix,
    a: &Array2<f64>,
    b: &Array2<f64>,
    regularization: f64,
) -> f64 {
    target
        .observed_cells()
        .map(|(i, j, observed)| {
            let error = observed - predict(a, b, i, j);
            let a_row = a.row(i);
            let b_row = b.row(j);
            let penalty = a_row.dot(&a_row) + b_row.dot(&b_row);
            error * error + (regularization / 2.0) * penalty
        })
        .sum()
}

/// Plain squared error of `approx` against the observed cells of `target`
pub fn observed_squared_error(target: &TargetMatrix, approx: &Array2<f64>) -> f64 {
    target
        .observed_cells()
        .map(|(i, j, observed)| {
            let diff = observed - approx[[i, j]];
            diff * diff
        })
        .sum()
}
