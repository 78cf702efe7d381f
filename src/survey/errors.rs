//! survey::errors — umbrella error type for the generation pipeline.
//!
//! Purpose
//! -------
//! Provide the single error surface seen by pipeline callers: design
//! validation failures plus `From` conversions from the subsystem errors
//! (`ConstraintError`, `FitError`, `SampleError`), so `generate` can use
//! `?` across registration, fitting, and sampling without callers matching
//! on three unrelated enums.
//!
//! Conventions
//! -----------
//! - Subsystem errors are wrapped verbatim; their `Display` messages are
//!   embedded so diagnostics lose nothing in the conversion.
//! - Design and option validation variants live here because they belong
//!   to the pipeline surface, not to any one subsystem.
//!
//! Testing notes
//! -------------
//! - Unit tests verify the `From` conversions and `Display` embedding of
//!   wrapped subsystem messages.

use crate::constraints::ConstraintError;
use crate::fitting::FitError;
use crate::sampling::SampleError;

pub type SurveyResult<T> = Result<T, SurveyError>;

/// SurveyError — pipeline-level error conditions.
///
/// Variants
/// --------
/// - `NoQuestions`
///   The survey design declares zero questions.
/// - `EmptyChoiceList { qid }`
///   A question declares zero choice labels.
/// - `InvalidTopK`
///   The top-K candidate count is zero.
/// - `InvalidRespondentCount`
///   The requested respondent count is zero.
/// - `InvalidSeedCeiling { value }`
///   The initial-table seed ceiling is zero.
/// - `Constraint` / `Fit` / `Sample`
///   Wrapped subsystem errors, converted via `From`.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyError {
    //------ Design and option validation ------
    NoQuestions,
    EmptyChoiceList { qid: usize },
    InvalidTopK,
    InvalidRespondentCount,
    InvalidSeedCeiling { value: u32 },
    //------ Wrapped subsystem errors ------
    Constraint(ConstraintError),
    Fit(FitError),
    Sample(SampleError),
}

impl std::error::Error for SurveyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyError::Constraint(err) => Some(err),
            SurveyError::Fit(err) => Some(err),
            SurveyError::Sample(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyError::NoQuestions => {
                write!(f, "Survey design must declare at least one question.")
            }
            SurveyError::EmptyChoiceList { qid } => {
                write!(f, "Question {qid} declares no choice labels.")
            }
            SurveyError::InvalidTopK => {
                write!(f, "top_k must be greater than zero.")
            }
            SurveyError::InvalidRespondentCount => {
                write!(f, "Respondent count must be greater than zero.")
            }
            SurveyError::InvalidSeedCeiling { value } => {
                write!(f, "Seed ceiling must be greater than zero; got: {value}")
            }
            SurveyError::Constraint(err) => write!(f, "Constraint registration failed: {err}"),
            SurveyError::Fit(err) => write!(f, "Fitting setup failed: {err}"),
            SurveyError::Sample(err) => write!(f, "Sampling failed: {err}"),
        }
    }
}

impl From<ConstraintError> for SurveyError {
    fn from(err: ConstraintError) -> Self {
        SurveyError::Constraint(err)
    }
}

impl From<FitError> for SurveyError {
    fn from(err: FitError) -> Self {
        SurveyError::Fit(err)
    }
}

impl From<SampleError> for SurveyError {
    fn from(err: SampleError) -> Self {
        SurveyError::Sample(err)
    }
}
