//! fitting::errors — error types for table fitting and verification.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the iterative proportional
//! fitting entry points. Only structural failures live here: a table whose
//! shape disagrees with the constraint set, invalid cells, an empty
//! constraint set, or malformed options. Non-convergence and constraint
//! mismatches are expected outcomes and are surfaced as data
//! (`FitOutcome::converged`, `ConstraintReport::passed`), never as errors.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints; payloads
//!   carry the offending value or the expected/actual shapes.
//! - Approximate convergence is the norm for overlapping constraints, so
//!   the propagation policy is deliberately asymmetric: registration and
//!   setup fail fast, fitting discrepancies are reported.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding; the paths producing
//!   these errors are exercised in `fitting::ipf` and `fitting::options`.

pub type FitResult<T> = Result<T, FitError>;

/// FitError — structural failures of the fitting and verification setup.
///
/// Variants
/// --------
/// - `NoConstraints`
///   The constraint set is empty; there is nothing to fit toward.
/// - `TableShapeMismatch { expected, actual }`
///   The initial (or verified) table's shape differs from the shape the
///   constraint set was declared against.
/// - `InvalidCell { value }`
///   A table cell is non-finite or negative.
/// - `InvalidConvergenceRate { value }`
///   The convergence rate is non-finite or not strictly positive.
/// - `InvalidMaxIterations`
///   The iteration cap is zero.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    NoConstraints,
    TableShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },
    InvalidCell { value: f64 },
    InvalidConvergenceRate { value: f64 },
    InvalidMaxIterations,
}

impl std::error::Error for FitError {}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::NoConstraints => {
                write!(f, "Constraint set is empty; at least one marginal target is required.")
            }
            FitError::TableShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Table shape must match the constraint set's declared shape: expected {expected:?}, got {actual:?}."
                )
            }
            FitError::InvalidCell { value } => {
                write!(f, "Table cells must be finite and non-negative; got: {value}")
            }
            FitError::InvalidConvergenceRate { value } => {
                write!(f, "Convergence rate must be finite and > 0; got: {value}")
            }
            FitError::InvalidMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero.")
            }
        }
    }
}
