//! Nonlinear least-squares fit of the logistic growth model.
//!
//! Given day indices `t_i` and smoothed fractions `y_i`, we minimize
//!
//! ```text
//! SSE(x0, r) = Σ (y_i - f(t_i; x0, r))^2
//! ```
//!
//! with Levenberg-Marquardt: Gauss-Newton steps from the analytic Jacobian,
//! damped multiplicatively whenever a step fails to reduce the SSE. The
//! procedure is deterministic given the inputs and the initial guess; a caller
//! wanting a different basin must re-invoke with a different guess.
//!
//! Standard errors come from the parameter covariance `σ² (JᵀJ)⁻¹` with
//! `σ² = SSE / (n - 2)`, evaluated at the solution. A singular or non-finite
//! covariance is surfaced as a non-identifiable convergence error, never as a
//! silent NaN.

use nalgebra::{DMatrix, DVector};

use crate::domain::{DEFAULT_MAX_ITERS, DEFAULT_R_INIT, DEFAULT_X0_INIT};
use crate::domain::{FitQuality, FitResult, LogisticFit};
use crate::error::EstimateError;
use crate::models::{partials, predict};

/// Damping cap: above this the line search has stalled at a stationary point.
const MAX_LAMBDA: f64 = 1e12;
/// Floor for the damped diagonal, guarding degenerate curvature entries.
const MIN_DIAG: f64 = 1e-12;
/// Relative SSE improvement below which an accepted step counts as converged.
const SSE_TOL: f64 = 1e-12;
/// Absolute parameter step below which an accepted step counts as converged.
const STEP_TOL: f64 = 1e-14;

/// Fitting options that affect how the model is calibrated.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Initial guess for `x0`; must lie in `(0, 1)`.
    pub x0_init: f64,
    /// Initial guess for the daily growth rate `r`.
    pub r_init: f64,
    /// Optimizer iteration budget.
    pub max_iters: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            x0_init: DEFAULT_X0_INIT,
            r_init: DEFAULT_R_INIT,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

/// Fit the logistic growth model to `(days, fractions)`.
pub fn fit_logistic(
    days: &[f64],
    fractions: &[f64],
    opts: &FitOptions,
) -> Result<FitResult, EstimateError> {
    let n = days.len();
    if n != fractions.len() {
        return Err(EstimateError::MalformedInput(format!(
            "day and fraction lengths differ ({n} vs {})",
            fractions.len()
        )));
    }
    // With 2 parameters the residual degrees of freedom are n - 2; standard
    // errors are undefined below 3 observations.
    if n < 3 {
        return Err(EstimateError::MalformedInput(format!(
            "need at least 3 observations to fit, got {n}"
        )));
    }
    if days.iter().chain(fractions.iter()).any(|v| !v.is_finite()) {
        return Err(EstimateError::MalformedInput(
            "non-finite value in fit inputs".to_string(),
        ));
    }
    if !(opts.x0_init > 0.0 && opts.x0_init < 1.0) {
        return Err(EstimateError::MalformedInput(format!(
            "initial x0 must lie in (0, 1), got {}",
            opts.x0_init
        )));
    }
    if !opts.r_init.is_finite() {
        return Err(EstimateError::MalformedInput(
            "initial r must be finite".to_string(),
        ));
    }

    let y = DVector::from_row_slice(fractions);

    let mut x0 = opts.x0_init;
    let mut r = opts.r_init;
    let mut resid = residuals(days, &y, x0, r);
    let mut sse = resid.norm_squared();
    let mut lambda = 1e-3;
    let mut iterations = 0usize;
    let mut converged = false;

    for iter in 1..=opts.max_iters {
        iterations = iter;

        let j = jacobian(days, x0, r);
        let jt = j.transpose();
        let h = &jt * &j;
        let g = &jt * &resid;

        // Raise damping until a step is admissible and reduces the SSE.
        let mut stepped = false;
        while lambda <= MAX_LAMBDA {
            let mut a = h.clone();
            for k in 0..2 {
                a[(k, k)] += lambda * h[(k, k)].max(MIN_DIAG);
            }
            let Some(delta) = a.lu().solve(&g) else {
                lambda *= 10.0;
                continue;
            };

            let cand_x0 = x0 + delta[0];
            let cand_r = r + delta[1];
            // x0 is probability-like; steps that leave (0,1) are rejected the
            // same way as non-descending ones.
            if !(cand_x0.is_finite() && cand_r.is_finite())
                || cand_x0 <= 0.0
                || cand_x0 >= 1.0
            {
                lambda *= 10.0;
                continue;
            }

            let cand_resid = residuals(days, &y, cand_x0, cand_r);
            let cand_sse = cand_resid.norm_squared();
            if !cand_sse.is_finite() || cand_sse > sse {
                lambda *= 10.0;
                continue;
            }

            let step = delta[0].abs().max(delta[1].abs());
            let rel_drop = (sse - cand_sse) / sse.max(1e-30);

            x0 = cand_x0;
            r = cand_r;
            resid = cand_resid;
            sse = cand_sse;
            lambda = (lambda * 0.1).max(1e-12);
            stepped = true;

            if rel_drop < SSE_TOL || step < STEP_TOL {
                converged = true;
            }
            break;
        }

        if !stepped {
            // No descent direction even with maximal damping: the iterate is a
            // stationary point of the objective.
            converged = true;
        }
        if converged {
            break;
        }
    }

    if !converged {
        return Err(EstimateError::FitDidNotConverge {
            reason: "iteration budget exhausted".to_string(),
            iterations,
            x0,
            r,
            residual_norm: sse.sqrt(),
        });
    }

    let (x0_stderr, r_stderr) = standard_errors(days, x0, r, sse, n, iterations)?;

    Ok(FitResult {
        model: LogisticFit {
            x0,
            r,
            x0_stderr,
            r_stderr,
        },
        quality: FitQuality {
            sse,
            rmse: (sse / n as f64).sqrt(),
            n,
            iterations,
        },
    })
}

/// Standard errors from the covariance diagonal at the solution.
fn standard_errors(
    days: &[f64],
    x0: f64,
    r: f64,
    sse: f64,
    n: usize,
    iterations: usize,
) -> Result<(f64, f64), EstimateError> {
    let non_identifiable = |detail: &str| EstimateError::FitDidNotConverge {
        reason: format!("non-identifiable: {detail}"),
        iterations,
        x0,
        r,
        residual_norm: sse.sqrt(),
    };

    let j = jacobian(days, x0, r);
    let h = j.transpose() * &j;
    let h_inv = h
        .try_inverse()
        .ok_or_else(|| non_identifiable("parameter covariance matrix is singular"))?;

    let sigma2 = sse / (n - 2) as f64;
    let var_x0 = sigma2 * h_inv[(0, 0)];
    let var_r = sigma2 * h_inv[(1, 1)];
    if !(var_x0.is_finite() && var_r.is_finite()) || var_x0 < 0.0 || var_r < 0.0 {
        return Err(non_identifiable("covariance diagonal is not finite and non-negative"));
    }

    Ok((var_x0.sqrt(), var_r.sqrt()))
}

fn residuals(days: &[f64], y: &DVector<f64>, x0: f64, r: f64) -> DVector<f64> {
    DVector::from_iterator(
        days.len(),
        days.iter()
            .zip(y.iter())
            .map(|(&t, &yi)| yi - predict(t, x0, r)),
    )
}

fn jacobian(days: &[f64], x0: f64, r: f64) -> DMatrix<f64> {
    let mut j = DMatrix::<f64>::zeros(days.len(), 2);
    for (i, &t) in days.iter().enumerate() {
        let (dx0, dr) = partials(t, x0, r);
        j[(i, 0)] = dx0;
        j[(i, 1)] = dr;
    }
    j
}
