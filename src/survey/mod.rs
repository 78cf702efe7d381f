//! survey — survey design and the end-to-end generation pipeline.
//!
//! Purpose
//! -------
//! Tie the crate's subsystems together under the surface most consumers
//! should depend on: [`SurveyDesign`] fixes the questions and choice labels
//! (and hence the contingency-table shape), [`generate`] runs one full
//! seed → fit → verify → sample → render pass, and [`SurveyError`] unifies
//! the error surface across registration, fitting, and sampling.
//!
//! Key behaviors
//! -------------
//! - Registration errors abort a run before any fitting work; fitting
//!   non-convergence and verification mismatches are carried as data on
//!   [`SurveyOutcome`] and the run still produces sampled output.
//! - Both randomness injection points go through a caller-supplied
//!   `rand::Rng`, so seeded runs are reproducible.
//!
//! Invariants & assumptions
//! ------------------------
//! - One ephemeral contingency table per [`generate`] call; no shared
//!   mutable state across invocations.
//! - Table shape, constraint set, and label metadata derive from the same
//!   design, keeping rendering total in practice.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: `SurveyDesign::new` → `constraint_builder()` → register
//!   constraints in dependency order → `build()` → `generate` → print
//!   `report_lines()`.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`design`] cover construction guards; tests in
//!   [`generate`] cover option validation and the 2x2 end-to-end scenario;
//!   tests in [`errors`] cover conversions. The three-question demo
//!   scenario is exercised in `tests/integration_survey_pipeline.rs`.

pub mod design;
pub mod errors;
pub mod generate;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::design::SurveyDesign;
pub use self::errors::{SurveyError, SurveyResult};
pub use self::generate::{
    BEGIN_BANNER, END_BANNER, GenerateOptions, SurveyOutcome, generate,
};
