//! sampling — synthetic respondent draws from a fitted table.
//!
//! Purpose
//! -------
//! Provide the thin consumer layer that turns a fitted contingency table
//! into simulated respondents: top-K candidate selection, weighted draws
//! with replacement through an injectable random source, and index-to-label
//! rendering.
//!
//! Key behaviors
//! -------------
//! - [`top_k`] fixes a deterministic ranking (descending weight, ties by
//!   ascending index tuple).
//! - [`sample`] validates weights and draws reproducibly under a seeded
//!   RNG.
//! - [`render`] maps index tuples to choice labels.
//!
//! Downstream usage
//! ----------------
//! - `survey::generate` chains the three operations; callers with their own
//!   tables can use them directly.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`sampler`] cover ranking, validation, determinism,
//!   rendering, and a χ² uniformity check; tests in [`errors`] cover
//!   `Display` payloads.

pub mod errors;
pub mod sampler;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SampleError, SampleResult};
pub use self::sampler::{CellWeight, render, sample, top_k};
