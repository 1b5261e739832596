//! Least squares solver.
//!
//! The smoother repeatedly solves small linear regression problems: a local
//! polynomial fit over each sliding window. The design matrices are tiny
//! (window length × (order + 1)) but numerous, and edge windows are truncated,
//! so the solver must tolerate tall and occasionally underdetermined systems.
//!
//! Implementation choices:
//! - SVD-based solve, which handles tall matrices and returns the min-norm
//!   solution when a truncated edge window is underdetermined.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - Parameter dimension is tiny (≤ window length), so SVD cost is negligible.

use nalgebra::{DMatrix, DVector};

/// Singular-value cutoff for a well-conditioned window.
const STRICT_TOL: f64 = 1e-10;
/// Relaxed cutoff used only when the strict solve fails; truncated edge
/// windows at high polynomial order can be close to rank-deficient.
const RELAXED_TOL: f64 = 1e-6;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[STRICT_TOL, RELAXED_TOL] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
