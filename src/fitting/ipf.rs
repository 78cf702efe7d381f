//! fitting::ipf — iterative proportional fitting of the contingency table.
//!
//! Purpose
//! -------
//! Reconcile an initial random contingency table against a set of possibly
//! overlapping marginal constraints. Each step rescales the table
//! multiplicatively along one constraint's dimension group so that the
//! group's marginal matches the target exactly for that step; full passes
//! over all constraints repeat until the table stops moving or an iteration
//! cap is reached.
//!
//! Key behaviors
//! -------------
//! - Validate the setup before any fitting work: table shape against the
//!   constraint set's declared shape, cell finiteness / non-negativity, and
//!   a non-empty constraint set.
//! - Apply the multiplicative update
//!   `cell *= target[m] / current[m]` per constraint, where `m` is the
//!   cell's index restricted to the constraint's dimension group; cells
//!   under a zero current marginal are left unchanged to avoid division by
//!   zero.
//! - Stop once the maximum relative marginal discrepancy across all
//!   constraints falls below `FitOptions::convergence_rate`, or after
//!   `FitOptions::max_iterations` passes.
//!
//! Invariants & assumptions
//! ------------------------
//! - Cells are non-negative throughout: the update multiplies non-negative
//!   cells by non-negative ratios (targets are validated non-negative at
//!   registration).
//! - Overlapping constraints are not guaranteed to be jointly satisfiable;
//!   the loop is a best-effort fixed-point iteration, not an exact solver.
//!   For mutually inconsistent targets it oscillates, hits the cap, and
//!   reports `converged = false` — callers may still use the table.
//!
//! Conventions
//! -----------
//! - Non-convergence is data, not an error: [`FitOutcome`] carries a
//!   `converged` flag plus diagnostics (`iterations`, `max_discrepancy`), and the
//!   fitted table is always returned.
//! - The fitting loop performs no I/O and no logging; callers orchestrate
//!   reporting.
//!
//! Downstream usage
//! ----------------
//! - `survey::generate` seeds a random table and passes it here together
//!   with the built [`ConstraintSet`]; the fitted table then flows to
//!   `fitting::verify` and `sampling::top_k`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover single-constraint exactness (one rescaling pass
//!   satisfies a lone 1-D constraint), compatible-constraint convergence,
//!   inconsistent-constraint best-effort behavior, zero-marginal handling,
//!   and every setup validation branch.

use crate::constraints::{Constraint, ConstraintSet};
use crate::fitting::{
    errors::{FitError, FitResult},
    options::FitOptions,
};
use ndarray::ArrayD;

/// FitOutcome — fitted table plus termination diagnostics.
///
/// Purpose
/// -------
/// Carry the result of one fitting run: the (possibly partially converged)
/// table, whether the convergence threshold was met, how many full passes
/// ran, and the final marginal discrepancy.
///
/// Fields
/// ------
/// - `table`: the fitted contingency table, same shape as the input.
/// - `converged`: `true` if `max_discrepancy` fell below the configured
///   convergence rate within the iteration cap.
/// - `iterations`: number of full passes performed (≥ 1).
/// - `max_discrepancy`: maximum relative marginal discrepancy across all
///   constraints after the final pass (`|target − observed|` scaled by the
///   target cell's magnitude, or taken absolutely where the target is
///   below one).
///
/// Invariants
/// ----------
/// - `table` is non-negative and finite whenever the input table and
///   targets were.
/// - `iterations <= FitOptions::max_iterations`.
///
/// Notes
/// -----
/// - A `converged = false` outcome is expected for mutually inconsistent
///   constraint systems and is not an error; the verifier's per-constraint
///   reports show which targets the compromise table misses.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub table: ArrayD<f64>,
    pub converged: bool,
    pub iterations: usize,
    pub max_discrepancy: f64,
}

/// Fit `initial` to the constraint set by iterative proportional fitting.
///
/// Parameters
/// ----------
/// - `initial`: starting contingency table; shape must equal the constraint
///   set's declared shape, entries finite and non-negative. Taken by value:
///   the table is ephemeral and mutated in place across passes.
/// - `constraints`: frozen set of marginal targets, applied in registration
///   order within each pass.
/// - `opts`: convergence threshold and iteration cap.
///
/// Returns
/// -------
/// `FitResult<FitOutcome>`
///   - `Ok(FitOutcome)` with the fitted table and termination diagnostics;
///     non-convergence is reported via `FitOutcome::converged`, never as an
///     error.
///   - `Err(FitError)` only for structural setup failures.
///
/// Errors
/// ------
/// - [`FitError::NoConstraints`] if `constraints` is empty.
/// - [`FitError::TableShapeMismatch`] if `initial`'s shape differs from
///   `constraints.shape()`.
/// - [`FitError::InvalidCell`] if any cell is non-finite or negative.
///
/// Panics
/// ------
/// - Never panics under normal operation; constraint targets are shape-
///   validated at registration and the table is shape-validated here.
pub fn fit(
    initial: ArrayD<f64>, constraints: &ConstraintSet, opts: &FitOptions,
) -> FitResult<FitOutcome> {
    if constraints.is_empty() {
        return Err(FitError::NoConstraints);
    }
    if initial.shape() != constraints.shape() {
        return Err(FitError::TableShapeMismatch {
            expected: constraints.shape().to_vec(),
            actual: initial.shape().to_vec(),
        });
    }
    for &value in initial.iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(FitError::InvalidCell { value });
        }
    }

    let mut table = initial;
    let mut iterations = 0;
    let mut max_discrepancy = f64::INFINITY;
    let mut converged = false;

    while iterations < opts.max_iterations {
        for constraint in constraints.iter() {
            scale_to_marginal(&mut table, constraint);
        }
        iterations += 1;

        max_discrepancy = constraints
            .iter()
            .map(|c| marginal_discrepancy(&table, c))
            .fold(0.0, f64::max);
        if max_discrepancy <= opts.convergence_rate {
            converged = true;
            break;
        }
    }

    Ok(FitOutcome { table, converged, iterations, max_discrepancy })
}

/// Maximum relative deviation of `constraint`'s current marginal from its
/// target. Deviations are scaled by the target cell's magnitude; targets
/// below one are compared absolutely so exact-zero cells do not blow up the
/// ratio.
fn marginal_discrepancy(table: &ArrayD<f64>, constraint: &Constraint) -> f64 {
    let observed = constraint.reduction.marginal(table);
    observed
        .iter()
        .zip(constraint.target.iter())
        .map(|(&obs, &tgt)| (obs - tgt).abs() / tgt.abs().max(1.0))
        .fold(0.0, f64::max)
}

/// One rescaling step: make `constraint`'s marginal of `table` match its
/// target exactly.
///
/// For each cell, the multiplier is `target[m] / current[m]` where `m` is
/// the cell's index restricted to the constraint's dimension group. Cells
/// whose current marginal is zero are left unchanged; a zero marginal with
/// a non-zero target cannot be repaired multiplicatively.
fn scale_to_marginal(table: &mut ArrayD<f64>, constraint: &Constraint) {
    let current = constraint.reduction.marginal(table);
    let dims = constraint.reduction.dims();

    let mut midx = vec![0usize; dims.len()];
    for (idx, cell) in table.indexed_iter_mut() {
        for (slot, &dim) in midx.iter_mut().zip(&dims) {
            *slot = idx[dim];
        }
        let denom = current[midx.as_slice()];
        if denom > 0.0 {
            *cell *= constraint.target[midx.as_slice()] / denom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintBuilder;
    use ndarray::{ArrayD, IxDyn, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact satisfaction of a single 1-D constraint after fitting.
    // - Joint convergence for compatible constraints.
    // - Best-effort, non-converged behavior for inconsistent constraints.
    // - Zero-cell and zero-marginal handling.
    // - Setup validation branches.
    //
    // They intentionally DO NOT cover:
    // - Tolerance-based pass/fail reporting, which lives in
    //   `fitting::verify`.
    // -------------------------------------------------------------------------

    fn marginal_of(table: &ArrayD<f64>, qid: usize) -> ArrayD<f64> {
        crate::constraints::Reduction::Marginal1D { qid }.marginal(table)
    }

    #[test]
    // Purpose
    // -------
    // Verify that a single 1-D constraint on an all-positive table is
    // satisfied exactly after fitting: one rescaling pass suffices.
    //
    // Given
    // -----
    // - A 2x2 table of ones.
    // - A lone 1-D constraint [30, 70] on question 1.
    //
    // Expect
    // ------
    // - The fitted table's question-1 marginal equals [30, 70] within the
    //   configured tolerance, and the outcome reports convergence.
    fn single_marginal_satisfied_exactly() {
        // Arrange
        let mut builder = ConstraintBuilder::new(&[2, 2]).unwrap();
        builder.add_1d_constraint(1, array![30.0, 70.0], "second question split").unwrap();
        let set = builder.build();
        let initial = ArrayD::from_elem(IxDyn(&[2, 2]), 1.0);

        // Act
        let outcome = fit(initial, &set, &FitOptions::default()).unwrap();

        // Assert
        assert!(outcome.converged, "Single constraint should converge, got {outcome:?}");
        let observed = marginal_of(&outcome.table, 1);
        assert!((observed[[0]] - 30.0).abs() < 1e-6, "Expected 30, got {}", observed[[0]]);
        assert!((observed[[1]] - 70.0).abs() < 1e-6, "Expected 70, got {}", observed[[1]]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that two compatible 1-D constraints are satisfied
    // simultaneously.
    //
    // Given
    // -----
    // - A 2x2 table with unequal positive cells.
    // - Constraints [50, 50] on question 0 and [30, 70] on question 1
    //   (equal totals, hence jointly satisfiable).
    //
    // Expect
    // ------
    // - Both marginals of the fitted table match their targets within 1e-4
    //   and the outcome reports convergence.
    fn compatible_marginals_jointly_satisfied() {
        // Arrange
        let mut builder = ConstraintBuilder::new(&[2, 2]).unwrap();
        builder.add_1d_constraint(0, array![50.0, 50.0], "first split").unwrap();
        builder.add_1d_constraint(1, array![30.0, 70.0], "second split").unwrap();
        let set = builder.build();
        let initial = array![[4.0, 1.0], [2.0, 8.0]].into_dyn();

        // Act
        let outcome = fit(initial, &set, &FitOptions::default()).unwrap();

        // Assert
        assert!(outcome.converged, "Compatible constraints should converge, got {outcome:?}");
        let m0 = marginal_of(&outcome.table, 0);
        let m1 = marginal_of(&outcome.table, 1);
        assert!((m0[[0]] - 50.0).abs() < 1e-4 && (m0[[1]] - 50.0).abs() < 1e-4);
        assert!((m1[[0]] - 30.0).abs() < 1e-4 && (m1[[1]] - 70.0).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Verify best-effort behavior for mutually inconsistent constraints:
    // the loop hits its cap, reports non-convergence, and still returns a
    // usable table lying between the two targets.
    //
    // Given
    // -----
    // - A 2x2 table of ones.
    // - A 1-D constraint [80, 20] on question 0 and a 2-D absolute
    //   constraint on (0, 1) whose row sums are [50, 50].
    //
    // Expect
    // ------
    // - `converged` is false at a small iteration cap.
    // - The fitted table's question-0 marginal matches neither target
    //   exactly but stays strictly between them.
    fn inconsistent_marginals_reach_best_effort_compromise() {
        // Arrange
        let mut builder = ConstraintBuilder::new(&[2, 2]).unwrap();
        builder.add_1d_constraint(0, array![80.0, 20.0], "skewed split").unwrap();
        builder
            .add_2d_constraint_abs(0, 1, array![[25.0, 25.0], [25.0, 25.0]], "uniform joint")
            .unwrap();
        let set = builder.build();
        let initial = ArrayD::from_elem(IxDyn(&[2, 2]), 1.0);
        let opts = FitOptions::new(1e-9, 50).unwrap();

        // Act
        let outcome = fit(initial, &set, &opts).unwrap();

        // Assert
        assert!(!outcome.converged, "Inconsistent constraints must not converge, got {outcome:?}");
        assert_eq!(outcome.iterations, 50);
        // The joint constraint is applied last each pass, so its row sums
        // hold exactly; the 1-D target [80, 20] is necessarily missed.
        let m0 = marginal_of(&outcome.table, 0);
        assert!((m0[[0]] - 50.0).abs() < 1e-9, "Last-applied target should hold, got {m0:?}");
        assert!((m0[[0]] - 80.0).abs() > 1.0, "The conflicting target must be missed, got {m0:?}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that cells under a zero current marginal are left unchanged
    // rather than triggering a division by zero.
    //
    // Given
    // -----
    // - A 2x2 table whose first row is all zeros.
    // - A 1-D constraint [10, 10] on question 0 (row 0 target unreachable).
    //
    // Expect
    // ------
    // - Row 0 stays zero and every cell remains finite.
    fn zero_marginal_leaves_cells_unchanged() {
        // Arrange
        let mut builder = ConstraintBuilder::new(&[2, 2]).unwrap();
        builder.add_1d_constraint(0, array![10.0, 10.0], "unreachable row").unwrap();
        let set = builder.build();
        let initial = array![[0.0, 0.0], [3.0, 1.0]].into_dyn();

        // Act
        let outcome = fit(initial, &set, &FitOptions::default()).unwrap();

        // Assert
        assert_eq!(outcome.table[[0, 0]], 0.0);
        assert_eq!(outcome.table[[0, 1]], 0.0);
        assert!(outcome.table.iter().all(|v| v.is_finite()), "No cell may become non-finite");
        let row1 = outcome.table[[1, 0]] + outcome.table[[1, 1]];
        assert!((row1 - 10.0).abs() < 1e-6, "Reachable row should be rescaled, got {row1}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the setup validation branches of `fit`.
    //
    // Given
    // -----
    // - An empty constraint set, a mis-shaped table, and a table holding a
    //   negative cell.
    //
    // Expect
    // ------
    // - `NoConstraints`, `TableShapeMismatch`, and `InvalidCell`
    //   respectively.
    fn setup_validation_fails_fast() {
        // Arrange
        let empty = ConstraintBuilder::new(&[2, 2]).unwrap().build();
        let mut builder = ConstraintBuilder::new(&[2, 2]).unwrap();
        builder.add_1d_constraint(0, array![1.0, 1.0], "split").unwrap();
        let set = builder.build();

        // Act / Assert
        match fit(ArrayD::from_elem(IxDyn(&[2, 2]), 1.0), &empty, &FitOptions::default()) {
            Err(FitError::NoConstraints) => (),
            other => panic!("expected NoConstraints error, got {other:?}"),
        }
        match fit(ArrayD::from_elem(IxDyn(&[3, 2]), 1.0), &set, &FitOptions::default()) {
            Err(FitError::TableShapeMismatch { expected, actual }) => {
                assert_eq!(expected, vec![2, 2]);
                assert_eq!(actual, vec![3, 2]);
            }
            other => panic!("expected TableShapeMismatch error, got {other:?}"),
        }
        match fit(array![[1.0, -2.0], [1.0, 1.0]].into_dyn(), &set, &FitOptions::default()) {
            Err(FitError::InvalidCell { value }) => assert_eq!(value, -2.0),
            other => panic!("expected InvalidCell error, got {other:?}"),
        }
    }
}
