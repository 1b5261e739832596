//! Crate-wide error type.
//!
//! Every failure in the pipeline maps to one of a small set of variants, each
//! with a stable process exit code:
//!
//! - `2` — input problems (bad CSV, bad dates, I/O)
//! - `3` — smoothing configuration incompatible with the series
//! - `4` — the optimizer failed (did not converge, or non-identifiable)
//!
//! Nothing is retried or swallowed inside the library; errors propagate to
//! `app::run` and the binary turns them into the exit code.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum EstimateError {
    /// The input series is unusable: missing/unparseable dates, a zero
    /// `total_tested` denominator, counts out of range, gaps or duplicates.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Smoothing window/order incompatible with the series.
    #[error("invalid smoothing window: {0}")]
    InvalidWindow(String),

    /// The nonlinear least-squares fit failed.
    ///
    /// Carries the last parameter iterate and residual norm so a caller can
    /// judge whether a different initial guess is worth a retry.
    #[error(
        "fit did not converge: {reason} (after {iterations} iterations; \
         last iterate x0={x0:.6e}, r={r:.6e}, residual norm={residual_norm:.6e})"
    )]
    FitDidNotConverge {
        reason: String,
        iterations: usize,
        x0: f64,
        r: f64,
        residual_norm: f64,
    },

    /// Filesystem-level failure reading inputs or writing exports.
    #[error("{0}")]
    Io(String),
}

impl EstimateError {
    /// Process exit code for the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            EstimateError::MalformedInput(_) | EstimateError::Io(_) => 2,
            EstimateError::InvalidWindow(_) => 3,
            EstimateError::FitDidNotConverge { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(EstimateError::MalformedInput("x".into()).exit_code(), 2);
        assert_eq!(EstimateError::InvalidWindow("x".into()).exit_code(), 3);
        let e = EstimateError::FitDidNotConverge {
            reason: "budget".into(),
            iterations: 100,
            x0: 0.001,
            r: 0.008,
            residual_norm: 1.0,
        };
        assert_eq!(e.exit_code(), 4);
    }

    #[test]
    fn convergence_error_mentions_last_iterate() {
        let e = EstimateError::FitDidNotConverge {
            reason: "iteration budget exhausted".into(),
            iterations: 100,
            x0: 0.5,
            r: 0.01,
            residual_norm: 2.5,
        };
        let msg = e.to_string();
        assert!(msg.contains("iteration budget exhausted"));
        assert!(msg.contains("100"));
        assert!(msg.contains("residual norm"));
    }
}
