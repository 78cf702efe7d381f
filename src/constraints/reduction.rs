//! Marginal reductions over the contingency table.
//!
//! Each constraint declares the dimension group its target is defined over
//! (one question for a plain distribution, two for a joint distribution).
//! The reduction collapses the table onto that group by summing over every
//! other axis. Representing the reduction as a tagged variant rather than a
//! per-constraint closure keeps it a pure function of `(tag, table)` with no
//! captured state.

use ndarray::{ArrayD, Axis};

/// Reduction — which marginal of the contingency table a constraint targets.
///
/// - `Marginal1D { qid }`: the distribution of a single question.
/// - `Marginal2D { qid1, qid2 }`: the joint distribution of two distinct
///   questions, with axes in the declared `(qid1, qid2)` order.
///
/// Invariant: question ids are validated against the table shape at
/// registration time; `marginal` assumes they are in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Marginal1D { qid: usize },
    Marginal2D { qid1: usize, qid2: usize },
}

impl Reduction {
    /// The dimension group in declared order.
    pub fn dims(&self) -> Vec<usize> {
        match *self {
            Reduction::Marginal1D { qid } => vec![qid],
            Reduction::Marginal2D { qid1, qid2 } => vec![qid1, qid2],
        }
    }

    /// Compute this reduction's marginal of `table`.
    ///
    /// Sums `table` over every axis outside the dimension group. The result
    /// has one axis per group member, ordered as declared: a
    /// `Marginal2D { qid1: 2, qid2: 0 }` reduction of a 3-D table yields a
    /// `(shape[2], shape[0])` array, matching the orientation of the target
    /// it will be compared against.
    ///
    /// # Panics
    /// - Panics if a question id is out of range for `table`'s
    ///   dimensionality. Registration validates ids up front, so reaching
    ///   this from the public API indicates a programming error.
    pub fn marginal(&self, table: &ArrayD<f64>) -> ArrayD<f64> {
        let keep = self.dims();
        let mut reduced = table.clone();

        // Collapse from the highest axis down so earlier indices stay valid.
        for axis in (0..table.ndim()).rev() {
            if !keep.contains(&axis) {
                reduced = reduced.sum_axis(Axis(axis));
            }
        }

        // Surviving axes are in ascending order; restore declared order.
        if let Reduction::Marginal2D { qid1, qid2 } = *self {
            if qid1 > qid2 {
                reduced.swap_axes(0, 1);
                reduced = reduced.as_standard_layout().to_owned();
            }
        }
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - 1-D and 2-D marginals of small 2-D and 3-D tables.
    // - Axis ordering of 2-D marginals when the declared order is not
    //   ascending.
    //
    // They intentionally DO NOT cover:
    // - Out-of-range question ids, which are rejected at registration time
    //   and documented as a panic here.
    // -------------------------------------------------------------------------

    fn table_2x3() -> ArrayD<f64> {
        array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a 1-D reduction sums over every other axis and keeps the
    // declared question's axis.
    //
    // Given
    // -----
    // - A 2x3 table with known row and column sums.
    //
    // Expect
    // ------
    // - Marginal1D over qid 0 yields the row sums [6, 15].
    // - Marginal1D over qid 1 yields the column sums [5, 7, 9].
    fn marginal_1d_sums_over_remaining_axes() {
        // Arrange
        let table = table_2x3();

        // Act
        let rows = Reduction::Marginal1D { qid: 0 }.marginal(&table);
        let cols = Reduction::Marginal1D { qid: 1 }.marginal(&table);

        // Assert
        assert_eq!(rows, array![6.0, 15.0].into_dyn());
        assert_eq!(cols, array![5.0, 7.0, 9.0].into_dyn());
    }

    #[test]
    // Purpose
    // -------
    // Verify that a 2-D reduction of a 3-D table collapses only the
    // unconstrained axis.
    //
    // Given
    // -----
    // - A 2x2x2 table of ones.
    //
    // Expect
    // ------
    // - Marginal2D over (0, 2) yields a 2x2 array of twos (axis 1 summed).
    fn marginal_2d_collapses_unconstrained_axis() {
        // Arrange
        let table = ArrayD::from_elem(IxDyn(&[2, 2, 2]), 1.0);

        // Act
        let joint = Reduction::Marginal2D { qid1: 0, qid2: 2 }.marginal(&table);

        // Assert
        assert_eq!(joint, ArrayD::from_elem(IxDyn(&[2, 2]), 2.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a 2-D reduction declared in descending question order
    // returns its axes in the declared order, not ascending axis order.
    //
    // Given
    // -----
    // - A 2x3 table.
    //
    // Expect
    // ------
    // - Marginal2D over (1, 0) has shape (3, 2) and is the transpose of the
    //   (0, 1) marginal.
    fn marginal_2d_respects_declared_axis_order() {
        // Arrange
        let table = table_2x3();

        // Act
        let forward = Reduction::Marginal2D { qid1: 0, qid2: 1 }.marginal(&table);
        let swapped = Reduction::Marginal2D { qid1: 1, qid2: 0 }.marginal(&table);

        // Assert
        assert_eq!(forward.shape(), &[2, 3]);
        assert_eq!(swapped.shape(), &[3, 2]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(forward[[i, j]], swapped[[j, i]]);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `dims` reports the dimension group in declared order.
    //
    // Given
    // -----
    // - A Marginal1D and a descending-order Marginal2D.
    //
    // Expect
    // ------
    // - `dims` returns [1] and [2, 0] respectively.
    fn dims_preserves_declared_order() {
        // Arrange / Act / Assert
        assert_eq!(Reduction::Marginal1D { qid: 1 }.dims(), vec![1]);
        assert_eq!(Reduction::Marginal2D { qid1: 2, qid2: 0 }.dims(), vec![2, 0]);
    }
}
