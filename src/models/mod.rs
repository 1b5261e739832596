//! Logistic growth model evaluation.
//!
//! The fitter relies on two primitive operations:
//! - predict the marker fraction for a given day (for residuals/projections)
//! - compute the partial derivatives in `(x0, r)` (for the Jacobian)
//!
//! Both are implemented here.

pub mod logistic;

pub use logistic::*;
