//! fitting — iterative proportional fitting and verification.
//!
//! Purpose
//! -------
//! House the numerical core of the crate: the IPF loop that reconciles an
//! initial contingency table against a [`ConstraintSet`]
//! (`crate::constraints::ConstraintSet`), the options carrier that
//! configures it, and the verifier that reports per-constraint closeness of
//! the fitted table.
//!
//! Key behaviors
//! -------------
//! - [`ipf`] performs multiplicative rescaling passes until the maximum
//!   relative marginal discrepancy falls below the convergence rate or the
//!   iteration cap is hit; non-convergence is surfaced as a flag on
//!   [`FitOutcome`], never as an error.
//! - [`verify`] recomputes each declared marginal and classifies it against
//!   the fixed 5%-of-target elementwise tolerance, producing
//!   [`ConstraintReport`] values whose `Display` is the reporting sink's
//!   line format.
//! - [`options`] validates the convergence rate and iteration cap up front.
//!
//! Invariants & assumptions
//! ------------------------
//! - Tables are non-negative finite `f64` arrays whose shape equals the
//!   constraint set's declared shape; entry points validate this before any
//!   work.
//! - The loop is single-threaded and runs to completion or to its cap; no
//!   partial-result streaming, cancellation, or timeout.
//!
//! Downstream usage
//! ----------------
//! - `survey::generate` is the main consumer: seed → [`fit`] → [`verify`] →
//!   sampling. Callers needing lower-level control can invoke the fitter
//!   and verifier directly with their own tables.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`ipf`] cover convergence, best-effort compromise, and
//!   zero handling; tests in [`verify`] cover classification, idempotence,
//!   and the degenerate zero-target tolerance; tests in [`options`] and
//!   [`errors`] cover validation and `Display` payloads.

pub mod errors;
pub mod ipf;
pub mod options;
pub mod verify;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{FitError, FitResult};
pub use self::ipf::{FitOutcome, fit};
pub use self::options::FitOptions;
pub use self::verify::{ConstraintReport, RELATIVE_TOLERANCE, verify};
