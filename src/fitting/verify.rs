//! fitting::verify — per-constraint closeness reports for a fitted table.
//!
//! Purpose
//! -------
//! Check that a fitted contingency table actually reproduces each declared
//! marginal: recompute every constraint's marginal via its reduction rule
//! and compare it elementwise against the target within a relative
//! tolerance. Mismatches are expected outcomes of overlapping or
//! inconsistent constraint systems, so they are reported as data, never
//! raised.
//!
//! Key behaviors
//! -------------
//! - Apply the elementwise closeness test
//!   `|target − observed| ≤ 0.05 · |target|` per constraint.
//! - Carry the original reason string and both arrays in each
//!   [`ConstraintReport`] for diagnostics.
//! - Render the human-readable report lines
//!   `"[OK] constraint meets: <reason>"` /
//!   `"[ERROR] constraint meets: <reason>. expected <target> got <observed>"`
//!   via `Display`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Verification is pure and idempotent: the same table and constraints
//!   always yield identical reports.
//! - The tolerance is degenerate wherever a target cell is exactly zero,
//!   since `0.05 · 0 = 0` forces exact equality there. Exact-zero targets
//!   are the strictest case by construction; callers wanting slack at zero
//!   must say so in the target.
//!
//! Downstream usage
//! ----------------
//! - `survey::generate` runs verification right after fitting and carries
//!   the reports into `SurveyOutcome`; the demo binary prints one line per
//!   report.
//!
//! Testing notes
//! -------------
//! - Unit tests cover pass/fail classification, idempotence, the
//!   exact-zero-target strictness, and the `Display` line formats.

use crate::constraints::ConstraintSet;
use crate::fitting::errors::{FitError, FitResult};
use ndarray::ArrayD;

/// Relative tolerance of the closeness test, as a fraction of each target
/// cell's magnitude.
pub const RELATIVE_TOLERANCE: f64 = 0.05;

/// ConstraintReport — one constraint's verification result.
///
/// Fields
/// ------
/// - `reason`: the rationale string given at registration, verbatim.
/// - `target`: the declared marginal.
/// - `observed`: the marginal recomputed from the fitted table, same shape
///   as `target`.
/// - `passed`: whether every cell satisfied
///   `|target − observed| ≤ 0.05 · |target|`. Cells whose target is exactly
///   zero must match exactly (degenerate tolerance, see module docs).
///
/// Notes
/// -----
/// - `Display` renders the report as a single human-readable line in the
///   `[OK]` / `[ERROR]` format consumed by the reporting sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintReport {
    pub reason: String,
    pub target: ArrayD<f64>,
    pub observed: ArrayD<f64>,
    pub passed: bool,
}

impl std::fmt::Display for ConstraintReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.passed {
            write!(f, "[OK] constraint meets: {}", self.reason)
        } else {
            write!(
                f,
                "[ERROR] constraint meets: {}. expected {} got {}",
                self.reason, self.target, self.observed
            )
        }
    }
}

/// Verify every constraint against a fitted table.
///
/// Parameters
/// ----------
/// - `table`: the fitted contingency table; shape must equal the constraint
///   set's declared shape.
/// - `constraints`: the set the table was fitted against, in registration
///   order.
///
/// Returns
/// -------
/// `FitResult<Vec<ConstraintReport>>`
///   One report per constraint, in registration order. Constraint
///   mismatches set `passed = false`; they are never an error.
///
/// Errors
/// ------
/// - [`FitError::TableShapeMismatch`] if `table`'s shape differs from
///   `constraints.shape()` — a programming error caught before any
///   comparison.
pub fn verify(table: &ArrayD<f64>, constraints: &ConstraintSet) -> FitResult<Vec<ConstraintReport>> {
    if table.shape() != constraints.shape() {
        return Err(FitError::TableShapeMismatch {
            expected: constraints.shape().to_vec(),
            actual: table.shape().to_vec(),
        });
    }

    let reports = constraints
        .iter()
        .map(|constraint| {
            let observed = constraint.reduction.marginal(table);
            let passed = constraint
                .target
                .iter()
                .zip(observed.iter())
                .all(|(&tgt, &obs)| (tgt - obs).abs() <= RELATIVE_TOLERANCE * tgt.abs());
            ConstraintReport {
                reason: constraint.reason.clone(),
                target: constraint.target.clone(),
                observed,
                passed,
            }
        })
        .collect();
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintBuilder;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pass/fail classification at the 5% relative tolerance.
    // - Idempotence of verification.
    // - Exact-equality enforcement at zero-valued target cells.
    // - `Display` line formats and the shape guard.
    //
    // They intentionally DO NOT cover:
    // - Producing fitted tables, which is `fitting::ipf`'s concern; tables
    //   here are constructed directly.
    // -------------------------------------------------------------------------

    fn split_constraints() -> ConstraintSet {
        let mut builder = ConstraintBuilder::new(&[2, 2]).unwrap();
        builder.add_1d_constraint(0, array![50.0, 50.0], "rows split evenly").unwrap();
        builder.build()
    }

    #[test]
    // Purpose
    // -------
    // Verify pass/fail classification around the 5% band.
    //
    // Given
    // -----
    // - A target [50, 50] on question 0.
    // - One table with row sums [51, 49] (within 5%) and one with [60, 40]
    //   (outside 5%).
    //
    // Expect
    // ------
    // - The first report passes, the second fails, and both carry the
    //   reason and the observed marginal.
    fn tolerance_band_classifies_reports() {
        // Arrange
        let set = split_constraints();
        let close = array![[26.0, 25.0], [24.0, 25.0]].into_dyn();
        let far = array![[30.0, 30.0], [20.0, 20.0]].into_dyn();

        // Act
        let ok = verify(&close, &set).unwrap();
        let err = verify(&far, &set).unwrap();

        // Assert
        assert!(ok[0].passed, "51/49 lies within 5% of 50/50: {:?}", ok[0]);
        assert!(!err[0].passed, "60/40 lies outside 5% of 50/50: {:?}", err[0]);
        assert_eq!(err[0].reason, "rows split evenly");
        assert_eq!(err[0].observed, array![60.0, 40.0].into_dyn());
    }

    #[test]
    // Purpose
    // -------
    // Verify that running `verify` twice on the same inputs yields
    // identical reports.
    //
    // Given
    // -----
    // - A fixed table and constraint set.
    //
    // Expect
    // ------
    // - Two calls return equal report vectors.
    fn verification_is_idempotent() {
        // Arrange
        let set = split_constraints();
        let table = array![[26.0, 25.0], [24.0, 25.0]].into_dyn();

        // Act
        let first = verify(&table, &set).unwrap();
        let second = verify(&table, &set).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    // Purpose
    // -------
    // Verify the inherited degenerate tolerance: a target cell of exactly
    // zero admits no deviation at all.
    //
    // Given
    // -----
    // - A target [100, 0] on question 0.
    // - A table whose second row sums to 1e-9 instead of 0.
    //
    // Expect
    // ------
    // - The report fails despite the tiny absolute deviation; a table with
    //   an exactly-zero second row passes.
    fn zero_target_cells_require_exact_equality() {
        // Arrange
        let mut builder = ConstraintBuilder::new(&[2, 2]).unwrap();
        builder.add_1d_constraint(0, array![100.0, 0.0], "second row absent").unwrap();
        let set = builder.build();
        let near_zero = array![[60.0, 40.0], [1e-9, 0.0]].into_dyn();
        let exact_zero = array![[60.0, 40.0], [0.0, 0.0]].into_dyn();

        // Act
        let near = verify(&near_zero, &set).unwrap();
        let exact = verify(&exact_zero, &set).unwrap();

        // Assert
        assert!(!near[0].passed, "Zero target admits no deviation: {:?}", near[0]);
        assert!(exact[0].passed, "Exact zero should pass: {:?}", exact[0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the `Display` line formats of passing and failing reports.
    //
    // Given
    // -----
    // - A passing and a failing report from the tolerance-band tables.
    //
    // Expect
    // ------
    // - `"[OK] constraint meets: <reason>"` for the pass.
    // - `"[ERROR] constraint meets: <reason>. expected ... got ..."` for
    //   the failure.
    fn report_lines_follow_reporting_format() {
        // Arrange
        let set = split_constraints();
        let ok = verify(&array![[25.0, 25.0], [25.0, 25.0]].into_dyn(), &set).unwrap();
        let err = verify(&array![[30.0, 30.0], [20.0, 20.0]].into_dyn(), &set).unwrap();

        // Act
        let ok_line = ok[0].to_string();
        let err_line = err[0].to_string();

        // Assert
        assert_eq!(ok_line, "[OK] constraint meets: rows split evenly");
        assert!(
            err_line.starts_with("[ERROR] constraint meets: rows split evenly. expected"),
            "Failure line should carry the reason and both arrays.\nGot: {err_line}"
        );
        assert!(err_line.contains("got"), "Failure line should include the observed marginal");
    }

    #[test]
    // Purpose
    // -------
    // Verify that a table of the wrong shape is rejected before any
    // comparison.
    //
    // Given
    // -----
    // - A [2, 2] constraint set and a [3, 2] table.
    //
    // Expect
    // ------
    // - `Err(FitError::TableShapeMismatch)`.
    fn mismatched_table_shape_fails_fast() {
        // Arrange
        let set = split_constraints();
        let table = ndarray::ArrayD::from_elem(ndarray::IxDyn(&[3, 2]), 1.0);

        // Act
        let result = verify(&table, &set);

        // Assert
        match result {
            Err(FitError::TableShapeMismatch { expected, actual }) => {
                assert_eq!(expected, vec![2, 2]);
                assert_eq!(actual, vec![3, 2]);
            }
            other => panic!("expected TableShapeMismatch error, got {other:?}"),
        }
    }
}
