//! sampling::errors — error types for respondent sampling and rendering.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the weighted-sampling and
//! label-rendering entry points. Sampling requires a non-degenerate weight
//! vector, so invalid weights fail fast; rendering fails when an index
//! tuple does not fit the configured label lists.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints; payloads
//!   carry the offending weight or index coordinates.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding; the producing paths are
//!   exercised in `sampling::sampler`.

pub type SampleResult<T> = Result<T, SampleError>;

/// SampleError — failures of weighted sampling and label rendering.
///
/// Variants
/// --------
/// - `NoCandidates`
///   The candidate pool is empty; there is nothing to draw from.
/// - `InvalidWeight { value }`
///   A candidate weight is non-finite or not strictly positive. Requiring
///   strictly positive weights also rules out a degenerate zero total.
/// - `LabelOutOfRange { qid, index, len }`
///   An index tuple component exceeds its question's label list. Should not
///   occur when the table shape was built from the same choice metadata.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    NoCandidates,
    InvalidWeight { value: f64 },
    LabelOutOfRange { qid: usize, index: usize, len: usize },
}

impl std::error::Error for SampleError {}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::NoCandidates => {
                write!(f, "Candidate pool is empty; sampling needs at least one cell.")
            }
            SampleError::InvalidWeight { value } => {
                write!(f, "Sampling weights must be finite and > 0; got: {value}")
            }
            SampleError::LabelOutOfRange { qid, index, len } => {
                write!(
                    f,
                    "Choice index {index} is out of range for question {qid} with {len} labels."
                )
            }
        }
    }
}
