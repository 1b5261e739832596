//! Mathematical utilities: least-squares solves and signal smoothing.

pub mod ols;
pub mod savgol;

pub use ols::*;
pub use savgol::*;
