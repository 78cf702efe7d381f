//! constraints — declaration and bookkeeping of marginal constraints.
//!
//! Purpose
//! -------
//! Bundle everything needed to declare the statistical constraints a
//! synthetic survey's joint response distribution must satisfy: the
//! [`Reduction`] tags that name which marginal of the contingency table a
//! constraint binds, the [`ConstraintBuilder`] registration surface with its
//! three declaration modes, and the frozen [`ConstraintSet`] value consumed
//! by fitting and verification.
//!
//! Key behaviors
//! -------------
//! - Validate registrations eagerly in [`builder`]: structural errors abort
//!   before any fitting work occurs.
//! - Keep reductions pure and closure-free in [`reduction`]: a constraint's
//!   marginal is a function of its tag and the table, nothing else.
//! - Centralize registration errors in [`errors`] (`ConstraintError` and
//!   the `ConstraintResult` alias).
//!
//! Invariants & assumptions
//! ------------------------
//! - A built [`ConstraintSet`] is immutable and always internally
//!   consistent with the shape it was declared against: every target's
//!   per-axis lengths equal the choice counts of its dimension group.
//! - Mutual consistency *between* constraints is deliberately not checked;
//!   the fitter finds a best-effort compromise and the verifier reports
//!   per-constraint closeness.
//!
//! Downstream usage
//! ----------------
//! - `fitting::fit` consumes a [`ConstraintSet`] together with an initial
//!   table; `fitting::verify` re-reads it to recompute and compare each
//!   declared marginal.
//! - Most callers obtain a builder through
//!   `survey::SurveyDesign::constraint_builder` rather than constructing
//!   one directly.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`builder`] cover all registration modes and validation
//!   branches; tests in [`reduction`] cover marginal arithmetic and axis
//!   ordering; tests in [`errors`] cover `Display` payloads.

pub mod builder;
pub mod errors;
pub mod reduction;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::builder::{Constraint, ConstraintBuilder, ConstraintSet};
pub use self::errors::{ConstraintError, ConstraintResult};
pub use self::reduction::Reduction;
