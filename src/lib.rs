//! survey_synth — synthetic survey data via iterative proportional fitting.
//!
//! Purpose
//! -------
//! Synthesize a fake multi-question survey dataset whose joint response
//! distribution satisfies user-specified marginal and conditional
//! statistical constraints. Given a contingency-table skeleton (questions ×
//! choices per question), the crate iteratively adjusts cell counts so that
//! declared 1-D and 2-D marginals match their targets, verifies the fitted
//! table against each declaration, and samples simulated respondents
//! proportionally to the resulting weights.
//!
//! Key behaviors
//! -------------
//! - Declare constraints in three modes through
//!   [`constraints::ConstraintBuilder`]: absolute 1-D, absolute 2-D, and
//!   2-D conditional derived from a previously registered 1-D marginal.
//! - Reconcile an initial random table against the frozen
//!   [`constraints::ConstraintSet`] with the iterative proportional fitting
//!   loop in [`fitting::fit`]; non-convergence is a reported flag, not an
//!   error.
//! - Check each declared marginal of the fitted table in
//!   [`fitting::verify`] within a 5%-of-target elementwise tolerance and
//!   report per-constraint pass/fail.
//! - Draw synthetic respondents from the top-K fitted cells in
//!   [`sampling`], rendering index tuples to choice labels.
//! - Orchestrate the whole pipeline per call in [`survey::generate`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Contingency tables are non-negative finite `f64` arrays whose shape is
//!   the per-question choice counts; one ephemeral table per generation
//!   call.
//! - Constraints accumulate monotonically and are registered in dependency
//!   order (a conditional 2-D constraint requires its 1-D weighting
//!   marginal first).
//! - Everything is single-threaded and synchronous; the only nondeterminism
//!   enters through caller-supplied `rand::Rng` values, so seeded runs are
//!   reproducible.
//!
//! Conventions
//! -----------
//! - Question ids are 0-based indices; index tuples are ordered by question
//!   id, matching the table's axes.
//! - The core performs no I/O and no logging; all human-readable reporting
//!   is produced as data (`ConstraintReport` lines, rendered respondent
//!   rows) and printed by the caller.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: build a [`survey::SurveyDesign`], register constraints
//!   through its `constraint_builder()`, `build()` the set, call
//!   [`survey::generate`] with seeded randomness, and print
//!   `report_lines()`.
//! - Lower-level callers can drive [`fitting::fit`] / [`fitting::verify`] /
//!   [`sampling::top_k`] directly with their own tables.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its validation branches and
//!   numerical behavior; `tests/integration_survey_pipeline.rs` exercises
//!   the full three-question demo scenario end to end.

pub mod constraints;
pub mod fitting;
pub mod sampling;
pub mod survey;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use survey_synth::prelude::*;
//
// to import the main generation surface in a single line, without pulling
// in lower-level internals.

pub mod prelude {
    pub use crate::constraints::{
        Constraint, ConstraintBuilder, ConstraintError, ConstraintResult, ConstraintSet, Reduction,
    };
    pub use crate::fitting::{
        ConstraintReport, FitError, FitOptions, FitOutcome, FitResult, fit, verify,
    };
    pub use crate::sampling::{CellWeight, SampleError, SampleResult, render, sample, top_k};
    pub use crate::survey::{
        GenerateOptions, SurveyDesign, SurveyError, SurveyOutcome, SurveyResult, generate,
    };
}
