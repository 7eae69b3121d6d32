//! Regression fits used by the diagnostics.

mod linear;
mod logistic;

pub use linear::{LinearFit, fit_linear};
pub use logistic::{FitError, LogisticFit, fit_logistic};
