//! Fitting configuration: convergence threshold and iteration cap.
//!
//! Kept as a small validated carrier so call sites pass explicit options
//! instead of ad-hoc numeric arguments, and so entry points can assume the
//! fields are well-formed.

use crate::fitting::errors::{FitError, FitResult};

/// Numerical knobs for the iterative proportional fitting loop.
///
/// - `convergence_rate`: the loop stops once the maximum relative marginal
///   discrepancy across all constraints falls below this threshold.
/// - `max_iterations`: hard cap on the number of full passes; reaching it
///   without meeting the threshold is reported via `FitOutcome::converged`,
///   not as an error.
///
/// Defaults: `convergence_rate = 1e-6`, `max_iterations = 500`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub convergence_rate: f64,
    pub max_iterations: usize,
}

impl FitOptions {
    /// Construct validated fitting options.
    ///
    /// # Rules
    /// - `convergence_rate` must be finite and strictly positive.
    /// - `max_iterations` must be greater than zero.
    ///
    /// # Errors
    /// - [`FitError::InvalidConvergenceRate`] for a non-finite or
    ///   non-positive rate.
    /// - [`FitError::InvalidMaxIterations`] for a zero cap.
    pub fn new(convergence_rate: f64, max_iterations: usize) -> FitResult<Self> {
        if !convergence_rate.is_finite() || convergence_rate <= 0.0 {
            return Err(FitError::InvalidConvergenceRate { value: convergence_rate });
        }
        if max_iterations == 0 {
            return Err(FitError::InvalidMaxIterations);
        }
        Ok(Self { convergence_rate, max_iterations })
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self { convergence_rate: 1e-6, max_iterations: 500 }
    }
}
