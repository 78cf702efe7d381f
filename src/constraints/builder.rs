//! constraints::builder — declaration of marginal constraints for fitting.
//!
//! Purpose
//! -------
//! Provide the registration surface through which callers declare the
//! marginal targets a fitted contingency table must reproduce: direct 1-D
//! distributions, absolute 2-D joint distributions, and 2-D joint
//! distributions derived from a conditional-rate matrix and a previously
//! registered 1-D marginal.
//!
//! Key behaviors
//! -------------
//! - Validate every registration against the table shape up front: question
//!   ids in range, target lengths equal to choice counts, entries finite and
//!   non-negative, no duplicate 1-D marginals, and dependency order for
//!   conditional constraints.
//! - Derive absolute 2-D targets from conditional rates by broadcasting the
//!   prior 1-D weighting vector along the new axis.
//! - Produce an immutable [`ConstraintSet`] via a consuming `build()`, so
//!   fitting and verification operate on a frozen, explicitly passed value
//!   rather than shared mutable state.
//!
//! Invariants & assumptions
//! ------------------------
//! - Constraints accumulate monotonically; there are no removal or update
//!   operations.
//! - The 1-D side index used for conditional derivation lives only inside
//!   the builder; the built [`ConstraintSet`] carries targets, reductions,
//!   and reasons, nothing else.
//! - No cross-constraint consistency validation happens at registration
//!   time: mutually inconsistent targets are legal here and are surfaced
//!   approximately by the verifier after fitting.
//!
//! Conventions
//! -----------
//! - Question ids are 0-based indices into the choice-count list.
//! - 2-D targets are oriented `(qid1, qid2)` in declared order; a rate
//!   matrix row `i` gives the fractions of category `i` of `qid1` falling
//!   into each category of `qid2`.
//! - Reason strings are never interpreted; they are carried through to the
//!   verifier's reports verbatim.
//!
//! Downstream usage
//! ----------------
//! - Build a `ConstraintBuilder` from the survey's choice counts (or via
//!   `SurveyDesign::constraint_builder`), register constraints in dependency
//!   order, then `build()` and pass the set to `fitting::fit` and
//!   `fitting::verify`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each validation branch, target-shape properties of
//!   all three registration modes, and the row-sum equivalence between the
//!   conditional and absolute 2-D forms.

use crate::constraints::{
    errors::{ConstraintError, ConstraintResult},
    reduction::Reduction,
};
use ndarray::{Array1, Array2, ArrayD, Axis};
use std::collections::BTreeMap;

/// A single marginal constraint: target array, reduction rule, and the
/// human-readable rationale carried through to verification reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Target marginal, shaped per the reduction's dimension group.
    pub target: ArrayD<f64>,
    /// Which marginal of the table this constraint binds.
    pub reduction: Reduction,
    /// Descriptive rationale; never interpreted, only reported.
    pub reason: String,
}

/// ConstraintSet — immutable ordered collection of constraints.
///
/// Produced by [`ConstraintBuilder::build`]; carries the table shape the
/// constraints were declared against so that fitting can reject a
/// mismatched initial table before any work occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
    shape: Vec<usize>,
}

impl ConstraintSet {
    /// The table shape (choice counts per question) the set was built for.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Iterate constraints in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    /// Number of registered constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether the set holds no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// ConstraintBuilder — accumulates validated constraints for one survey.
///
/// Purpose
/// -------
/// Expose the three registration operations (1-D absolute, 2-D absolute,
/// and 2-D conditional-on-1-D) and freeze the result into a
/// [`ConstraintSet`]. The builder owns the only mutable constraint state in
/// the crate; once `build()` runs, the set is a plain immutable value.
///
/// Key behaviors
/// -------------
/// - Fails fast on structural errors (out-of-range ids, shape mismatches,
///   duplicate 1-D marginals, missing conditional dependencies) before any
///   fitting work is attempted.
/// - Keeps a side index from question id to its registered 1-D target,
///   consulted only during conditional 2-D derivation.
///
/// Invariants
/// ----------
/// - `shape` is non-empty with every entry ≥ 1.
/// - Every stored `Constraint` has `target.ndim()` equal to the length of
///   its reduction's dimension group, with per-axis lengths matching the
///   group's choice counts.
/// - At most one 1-D constraint per question.
#[derive(Debug, Clone)]
pub struct ConstraintBuilder {
    shape: Vec<usize>,
    constraints: Vec<Constraint>,
    one_dim_targets: BTreeMap<usize, Array1<f64>>,
}

impl ConstraintBuilder {
    /// Construct a builder over the given choice counts.
    ///
    /// # Errors
    /// - [`ConstraintError::EmptyDesign`] if `choice_counts` is empty.
    /// - [`ConstraintError::EmptyQuestion`] if any count is zero.
    pub fn new(choice_counts: &[usize]) -> ConstraintResult<Self> {
        if choice_counts.is_empty() {
            return Err(ConstraintError::EmptyDesign);
        }
        for (qid, &count) in choice_counts.iter().enumerate() {
            if count == 0 {
                return Err(ConstraintError::EmptyQuestion { qid });
            }
        }
        Ok(ConstraintBuilder {
            shape: choice_counts.to_vec(),
            constraints: Vec::new(),
            one_dim_targets: BTreeMap::new(),
        })
    }

    /// Register a direct 1-D marginal target for question `qid`.
    ///
    /// The target is also recorded in the builder's side index so that later
    /// conditional 2-D registrations on `qid` can use it as their weighting
    /// vector.
    ///
    /// # Errors
    /// - [`ConstraintError::QuestionOutOfRange`] if `qid` is not a valid
    ///   question id.
    /// - [`ConstraintError::DuplicateMarginal`] if a 1-D constraint for
    ///   `qid` is already registered.
    /// - [`ConstraintError::TargetLengthMismatch`] if `dist.len()` differs
    ///   from the question's choice count.
    /// - [`ConstraintError::InvalidTargetValue`] if any entry is non-finite
    ///   or negative.
    pub fn add_1d_constraint(
        &mut self, qid: usize, dist: Array1<f64>, reason: &str,
    ) -> ConstraintResult<()> {
        self.check_qid(qid)?;
        if self.one_dim_targets.contains_key(&qid) {
            return Err(ConstraintError::DuplicateMarginal { qid });
        }
        if dist.len() != self.shape[qid] {
            return Err(ConstraintError::TargetLengthMismatch {
                qid,
                expected: self.shape[qid],
                actual: dist.len(),
            });
        }
        check_entries(dist.iter())?;

        self.one_dim_targets.insert(qid, dist.clone());
        self.constraints.push(Constraint {
            target: dist.into_dyn(),
            reduction: Reduction::Marginal1D { qid },
            reason: reason.to_string(),
        });
        Ok(())
    }

    /// Register a direct 2-D joint marginal target given as absolute counts.
    ///
    /// The caller is responsible for the supplied distribution being
    /// internally consistent with any other registered constraints; no
    /// cross-validation happens here. Inconsistencies surface approximately
    /// in the verifier's reports after fitting.
    ///
    /// # Errors
    /// - [`ConstraintError::QuestionOutOfRange`] for an invalid `qid1` or
    ///   `qid2`.
    /// - [`ConstraintError::DegenerateDimensionPair`] if `qid1 == qid2`.
    /// - [`ConstraintError::TargetShapeMismatch`] if `dist`'s shape differs
    ///   from `(choice_counts[qid1], choice_counts[qid2])`.
    /// - [`ConstraintError::InvalidTargetValue`] if any entry is non-finite
    ///   or negative.
    pub fn add_2d_constraint_abs(
        &mut self, qid1: usize, qid2: usize, dist: Array2<f64>, reason: &str,
    ) -> ConstraintResult<()> {
        self.check_pair(qid1, qid2, &dist)?;
        check_entries(dist.iter())?;

        self.constraints.push(Constraint {
            target: dist.into_dyn(),
            reduction: Reduction::Marginal2D { qid1, qid2 },
            reason: reason.to_string(),
        });
        Ok(())
    }

    /// Register a 2-D joint target derived from a conditional-rate matrix.
    ///
    /// `rate[i][j]` is the fraction of category `i` of `qid1` falling into
    /// category `j` of `qid2`. The absolute target is the elementwise
    /// product of `rate` with the previously registered 1-D marginal of
    /// `qid1`, broadcast along the `qid2` axis; the result then behaves
    /// exactly like an absolute 2-D constraint. Registration is therefore
    /// dependency-ordered: the 1-D constraint on `qid1` must come first.
    ///
    /// # Errors
    /// - [`ConstraintError::MissingDependency`] if no 1-D constraint for
    ///   `qid1` has been registered.
    /// - All shape and value errors of
    ///   [`add_2d_constraint_abs`](Self::add_2d_constraint_abs).
    pub fn add_2d_constraint(
        &mut self, qid1: usize, qid2: usize, rate: Array2<f64>, reason: &str,
    ) -> ConstraintResult<()> {
        self.check_pair(qid1, qid2, &rate)?;
        check_entries(rate.iter())?;
        let weights = self
            .one_dim_targets
            .get(&qid1)
            .ok_or(ConstraintError::MissingDependency { qid: qid1 })?;

        // target[i][j] = rate[i][j] * weights[i]
        let target = &rate * &weights.view().insert_axis(Axis(1));
        self.constraints.push(Constraint {
            target: target.into_dyn(),
            reduction: Reduction::Marginal2D { qid1, qid2 },
            reason: reason.to_string(),
        });
        Ok(())
    }

    /// Freeze the accumulated constraints into an immutable [`ConstraintSet`].
    pub fn build(self) -> ConstraintSet {
        ConstraintSet { constraints: self.constraints, shape: self.shape }
    }

    fn check_qid(&self, qid: usize) -> ConstraintResult<()> {
        if qid >= self.shape.len() {
            return Err(ConstraintError::QuestionOutOfRange { qid, nques: self.shape.len() });
        }
        Ok(())
    }

    fn check_pair(&self, qid1: usize, qid2: usize, dist: &Array2<f64>) -> ConstraintResult<()> {
        self.check_qid(qid1)?;
        self.check_qid(qid2)?;
        if qid1 == qid2 {
            return Err(ConstraintError::DegenerateDimensionPair { qid: qid1 });
        }
        let expected = (self.shape[qid1], self.shape[qid2]);
        let actual = dist.dim();
        if actual != expected {
            return Err(ConstraintError::TargetShapeMismatch { expected, actual });
        }
        Ok(())
    }
}

/// Reject non-finite or negative target entries.
fn check_entries<'a, I: Iterator<Item = &'a f64>>(entries: I) -> ConstraintResult<()> {
    for &value in entries {
        if !value.is_finite() || value < 0.0 {
            return Err(ConstraintError::InvalidTargetValue { value });
        }
    }
    Ok(())
}
