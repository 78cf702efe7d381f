//! sampling::sampler — top-K cell selection and weighted respondent draws.
//!
//! Purpose
//! -------
//! Turn a fitted contingency table into synthetic respondents: select the K
//! highest-weight cells as the finite candidate pool, draw answer
//! combinations with replacement proportionally to cell weight, and map
//! each drawn index tuple to its human-readable choice labels.
//!
//! Key behaviors
//! -------------
//! - [`top_k`] ranks cells by descending weight with ties broken by
//!   ascending index tuple, so the selection is deterministic and seeded
//!   runs stay reproducible.
//! - [`sample`] validates the candidate weights (finite, strictly
//!   positive) and draws independently with replacement through an
//!   injectable random source.
//! - [`render`] maps per-question indices to label strings, failing on any
//!   out-of-range component.
//!
//! Invariants & assumptions
//! ------------------------
//! - Candidate weights passed to [`sample`] are strictly positive, which
//!   guarantees a positive total; zero-weight cells are legal in the table
//!   but are expected to be filtered by ranking before sampling.
//! - Determinism: given the same candidates and a seeded RNG, draws are
//!   reproducible.
//!
//! Conventions
//! -----------
//! - Index tuples are ordered by question id, matching the table's axes.
//! - Rendering does not allocate beyond the returned label vector; labels
//!   are cloned from the configured lists.
//!
//! Downstream usage
//! ----------------
//! - `survey::generate` feeds the fitted table through [`top_k`] →
//!   [`sample`] → [`render`] and joins each label row with `", "` for the
//!   reporting sink.
//!
//! Testing notes
//! -------------
//! - Unit tests cover ranking and tie-breaking, oversized `k`, weight
//!   validation, seeded-draw determinism, label rendering, and a χ²
//!   goodness-of-fit check that uniform weights produce uniform draws.

use crate::sampling::errors::{SampleError, SampleResult};
use ndarray::{ArrayD, Dimension};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::cmp::Ordering;

/// A table cell identified by its index tuple, carrying its fitted weight.
#[derive(Debug, Clone, PartialEq)]
pub struct CellWeight {
    /// Per-question choice indices, ordered by question id.
    pub index: Vec<usize>,
    /// Fitted cell weight (expected respondent count).
    pub weight: f64,
}

/// Select the `k` highest-weight cells of `table`.
///
/// Ordering is descending by weight; equal weights are broken by ascending
/// index tuple, so the selection is deterministic. A `k` larger than the
/// number of cells returns every cell.
pub fn top_k(table: &ArrayD<f64>, k: usize) -> Vec<CellWeight> {
    let mut cells: Vec<CellWeight> = table
        .indexed_iter()
        .map(|(idx, &weight)| CellWeight { index: idx.slice().to_vec(), weight })
        .collect();
    cells.sort_unstable_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    cells.truncate(k);
    cells
}

/// Draw `count` index tuples with replacement, proportionally to weight.
///
/// Parameters
/// ----------
/// - `candidates`: the finite candidate pool, typically from [`top_k`].
/// - `count`: number of independent draws.
/// - `rng`: injectable random source; seed it for reproducible runs.
///
/// Returns
/// -------
/// `SampleResult<Vec<Vec<usize>>>`
///   `count` index tuples, each cloned from the drawn candidate.
///
/// Errors
/// ------
/// - [`SampleError::NoCandidates`] if `candidates` is empty.
/// - [`SampleError::InvalidWeight`] if any weight is non-finite or not
///   strictly positive.
pub fn sample<R: Rng + ?Sized>(
    candidates: &[CellWeight], count: usize, rng: &mut R,
) -> SampleResult<Vec<Vec<usize>>> {
    if candidates.is_empty() {
        return Err(SampleError::NoCandidates);
    }
    for cell in candidates {
        if !cell.weight.is_finite() || cell.weight <= 0.0 {
            return Err(SampleError::InvalidWeight { value: cell.weight });
        }
    }

    // Weights are validated strictly positive above, so construction
    // cannot fail on a degenerate total.
    let dist = WeightedIndex::new(candidates.iter().map(|c| c.weight))
        .map_err(|_| SampleError::NoCandidates)?;

    Ok((0..count).map(|_| candidates[dist.sample(rng)].index.clone()).collect())
}

/// Map an index tuple to its per-question choice labels.
///
/// # Errors
/// - [`SampleError::LabelOutOfRange`] if `index` has a component outside
///   its question's label list. This indicates the table shape and the
///   label metadata diverged; it cannot occur when both were built from the
///   same survey design.
pub fn render(index: &[usize], choice_names: &[Vec<String>]) -> SampleResult<Vec<String>> {
    index
        .iter()
        .zip(choice_names)
        .enumerate()
        .map(|(qid, (&choice, labels))| {
            labels
                .get(choice)
                .cloned()
                .ok_or(SampleError::LabelOutOfRange { qid, index: choice, len: labels.len() })
        })
        .collect()
}
