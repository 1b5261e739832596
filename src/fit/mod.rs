//! Curve fitting and projection.
//!
//! Responsibilities:
//!
//! - fit the logistic growth model by Levenberg-Marquardt (`fitter`)
//! - evaluate the fitted model over the projection horizon (`projection`)

pub mod fitter;
pub mod projection;

pub use fitter::*;
pub use projection::*;
