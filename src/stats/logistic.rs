//! Logistic regression of a binary outcome on one predictor.
//!
//! Fitted by Newton-Raphson on the log-likelihood (equivalently iteratively
//! reweighted least squares), which converges in a handful of steps for the
//! well-posed case and fails loudly otherwise.

use crate::constants::logistic::{DIVERGENCE_LIMIT, MAX_ITERATIONS, SINGULAR_EPSILON, TOLERANCE};

/// Why a logistic fit could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    /// No observations.
    #[error("no observations")]
    Empty,
    /// The information matrix cannot be inverted (e.g. a single distinct x).
    #[error("singular information matrix")]
    Singular,
    /// Coefficients grew without bound (perfectly separated outcomes).
    #[error("coefficients diverged (outcomes are perfectly separated)")]
    Diverged,
    /// The iteration limit was reached.
    #[error("did not converge within the iteration limit")]
    NotConverged,
}

/// A fitted model `P(y = 1 | x) = 1 / (1 + exp(-(intercept + slope * x)))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticFit {
    /// Intercept coefficient.
    pub intercept: f64,
    /// Slope coefficient.
    pub slope: f64,
    /// Newton iterations used.
    pub iterations: usize,
}

impl LogisticFit {
    /// Predicted probability at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        sigmoid(self.slope.mul_add(x, self.intercept))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Fit a logistic regression of `y` (0 or 1) on `x`.
pub fn fit_logistic(points: &[(f64, f64)]) -> Result<LogisticFit, FitError> {
    if points.is_empty() {
        return Err(FitError::Empty);
    }

    let (mut b0, mut b1) = (0.0_f64, 0.0_f64);

    for iteration in 1..=MAX_ITERATIONS {
        // Gradient g and negative Hessian [[h00, h01], [h01, h11]].
        let (mut g0, mut g1) = (0.0, 0.0);
        let (mut h00, mut h01, mut h11) = (0.0, 0.0, 0.0);
        for &(x, y) in points {
            let p = sigmoid(b1.mul_add(x, b0));
            let w = p * (1.0 - p);
            g0 += y - p;
            g1 += (y - p) * x;
            h00 += w;
            h01 += w * x;
            h11 += w * x * x;
        }

        let det = h00.mul_add(h11, -(h01 * h01));
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(FitError::Singular);
        }

        let step0 = h11.mul_add(g0, -(h01 * g1)) / det;
        let step1 = h00.mul_add(g1, -(h01 * g0)) / det;
        b0 += step0;
        b1 += step1;

        if !b0.is_finite()
            || !b1.is_finite()
            || b0.abs() > DIVERGENCE_LIMIT
            || b1.abs() > DIVERGENCE_LIMIT
        {
            return Err(FitError::Diverged);
        }

        if step0.abs().max(step1.abs()) < TOLERANCE {
            return Ok(LogisticFit {
                intercept: b0,
                slope: b1,
                iterations: iteration,
            });
        }
    }

    Err(FitError::NotConverged)
}
