//! survey::generate — the end-to-end synthetic survey pipeline.
//!
//! Purpose
//! -------
//! Orchestrate one full generation run: seed a random contingency table
//! over the design's shape, fit it to the declared constraints, verify each
//! constraint against the fitted table, select the top-K cells, draw
//! weighted respondents, and render them to label rows. One ephemeral table
//! per call; no state survives between invocations.
//!
//! Key behaviors
//! -------------
//! - Seed each cell with a uniform random integer in `[0, seed_ceiling)`
//!   through the injectable random source, so runs are reproducible under a
//!   seeded RNG.
//! - Treat fitting non-convergence and verification mismatches as data
//!   carried on [`SurveyOutcome`]; only structural errors abort the run.
//! - Produce the reporting sink's full output block via
//!   [`SurveyOutcome::report_lines`]: one line per verification report, the
//!   top-choices line, and the respondent rows bounded by the literal
//!   begin/end banner lines.
//!
//! Invariants & assumptions
//! ------------------------
//! - The table shape, constraint set, and label metadata all derive from
//!   the same [`SurveyDesign`], so rendering cannot see an out-of-range
//!   index in practice.
//! - Single-threaded and synchronous; the fitting loop runs to completion
//!   or to its cap before returning.
//!
//! Conventions
//! -----------
//! - Respondent rows are comma-joined label lists, one respondent per line.
//! - The pipeline itself performs no I/O; the demo binary prints the lines.
//!
//! Downstream usage
//! ----------------
//! - Build a [`SurveyDesign`] and a `ConstraintSet`, pick
//!   [`GenerateOptions`], seed an RNG, call [`generate`], and print
//!   [`SurveyOutcome::report_lines`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover option validation, the 2x2 end-to-end scenario, and
//!   the output block's structure; the three-question scenario lives in the
//!   crate's integration tests.

use crate::constraints::ConstraintSet;
use crate::fitting::{self, FitOptions};
use crate::sampling::{self, CellWeight};
use crate::survey::design::SurveyDesign;
use crate::survey::errors::{SurveyError, SurveyResult};
use ndarray::{ArrayD, IxDyn};
use rand::Rng;

/// Literal banner opening the respondent block of the output.
pub const BEGIN_BANNER: &str = "=== Begin to generate the faked survey ===";
/// Literal banner closing the respondent block of the output.
pub const END_BANNER: &str = "=== Finish generation ===";

/// GenerateOptions — configuration for one generation run.
///
/// Fields
/// ------
/// - `top_k`: size of the candidate pool drawn from the fitted table.
/// - `respondents`: number of synthetic respondents to draw.
/// - `seed_ceiling`: exclusive upper bound of the uniform integer used to
///   seed each initial table cell.
/// - `fit`: convergence threshold and iteration cap for the fitting loop.
///
/// Defaults: `top_k = 5`, `respondents = 20`, `seed_ceiling = 100`, and
/// [`FitOptions::default`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    pub top_k: usize,
    pub respondents: usize,
    pub seed_ceiling: u32,
    pub fit: FitOptions,
}

impl GenerateOptions {
    /// Construct validated generation options.
    ///
    /// # Errors
    /// - [`SurveyError::InvalidTopK`] if `top_k` is zero.
    /// - [`SurveyError::InvalidRespondentCount`] if `respondents` is zero.
    /// - [`SurveyError::InvalidSeedCeiling`] if `seed_ceiling` is zero.
    pub fn new(
        top_k: usize, respondents: usize, seed_ceiling: u32, fit: FitOptions,
    ) -> SurveyResult<Self> {
        if top_k == 0 {
            return Err(SurveyError::InvalidTopK);
        }
        if respondents == 0 {
            return Err(SurveyError::InvalidRespondentCount);
        }
        if seed_ceiling == 0 {
            return Err(SurveyError::InvalidSeedCeiling { value: seed_ceiling });
        }
        Ok(Self { top_k, respondents, seed_ceiling, fit })
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { top_k: 5, respondents: 20, seed_ceiling: 100, fit: FitOptions::default() }
    }
}

/// SurveyOutcome — everything one generation run produced.
///
/// Fields
/// ------
/// - `reports`: per-constraint verification results, in registration order.
/// - `top_cells`: the candidate pool, highest weight first.
/// - `respondents`: rendered label rows, one per synthetic respondent.
/// - `converged`: whether the fitting loop met its convergence threshold.
/// - `iterations`: number of fitting passes performed.
///
/// Notes
/// -----
/// - Verification mismatches and non-convergence are expected outcomes and
///   live here as data; the run still completed and sampled output.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyOutcome {
    pub reports: Vec<fitting::ConstraintReport>,
    pub top_cells: Vec<CellWeight>,
    pub respondents: Vec<Vec<String>>,
    pub converged: bool,
    pub iterations: usize,
}

impl SurveyOutcome {
    /// The human-readable output block for the reporting sink.
    ///
    /// One line per verification report, the top-choices line, then the
    /// respondent rows (comma-joined labels, one per line) bounded by the
    /// literal begin/end banners.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.reports.iter().map(|r| r.to_string()).collect();
        let indices: Vec<&[usize]> = self.top_cells.iter().map(|c| c.index.as_slice()).collect();
        lines.push(format!(
            "The {} top choices for the survey are {:?}",
            self.top_cells.len(),
            indices
        ));
        lines.push(BEGIN_BANNER.to_string());
        lines.extend(self.respondents.iter().map(|row| row.join(", ")));
        lines.push(END_BANNER.to_string());
        lines
    }
}

/// Run the full generation pipeline for one survey.
///
/// Parameters
/// ----------
/// - `design`: questions and choice labels; supplies the table shape and
///   the label metadata for rendering.
/// - `constraints`: frozen marginal targets, built against the same shape.
/// - `opts`: candidate-pool size, respondent count, seed ceiling, and
///   fitting options.
/// - `rng`: injectable random source used for both randomness injection
///   points (initial table seeding and weighted respondent draws).
///
/// Returns
/// -------
/// `SurveyResult<SurveyOutcome>`
///   The verification reports, candidate pool, rendered respondents, and
///   fitting diagnostics. Constraint mismatches and non-convergence are
///   carried as data, never as errors.
///
/// Errors
/// ------
/// - [`SurveyError::Fit`] for structural fitting-setup failures (shape
///   mismatch between table and constraints, empty constraint set).
/// - [`SurveyError::Sample`] if the candidate pool degenerates (e.g. every
///   fitted cell has zero weight) or rendering sees an out-of-range index.
pub fn generate<R: Rng + ?Sized>(
    design: &SurveyDesign, constraints: &ConstraintSet, opts: &GenerateOptions, rng: &mut R,
) -> SurveyResult<SurveyOutcome> {
    let shape = IxDyn(design.choice_counts());
    let initial = ArrayD::from_shape_fn(shape, |_| rng.gen_range(0..opts.seed_ceiling) as f64);

    let outcome = fitting::fit(initial, constraints, &opts.fit)?;
    let reports = fitting::verify(&outcome.table, constraints)?;

    // Zero-weight cells are legal in the fitted table but invalid sampling
    // candidates; drop them before drawing.
    let mut top_cells = sampling::top_k(&outcome.table, opts.top_k);
    top_cells.retain(|cell| cell.weight > 0.0);

    let drawn = sampling::sample(&top_cells, opts.respondents, rng)?;
    let respondents = drawn
        .iter()
        .map(|index| sampling::render(index, design.choice_names()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SurveyOutcome {
        reports,
        top_cells,
        respondents,
        converged: outcome.converged,
        iterations: outcome.iterations,
    })
}
