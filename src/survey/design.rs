//! Survey design: questions and their choice labels.
//!
//! Choice counts are derived from the label lists rather than supplied
//! separately, so the `labels-per-question == choice-count` invariant is
//! structural instead of validated. The design is set once at survey setup
//! and read-only afterwards.

use crate::constraints::{ConstraintBuilder, ConstraintResult};
use crate::survey::errors::{SurveyError, SurveyResult};

/// SurveyDesign — per-question choice labels and the table shape they imply.
///
/// - Question ids are 0-based positions in the label-list vector.
/// - The contingency-table shape is the per-question label counts.
///
/// Invariant: at least one question, and every question has at least one
/// label (enforced at construction).
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDesign {
    choice_names: Vec<Vec<String>>,
    choice_counts: Vec<usize>,
}

impl SurveyDesign {
    /// Construct a design from per-question label lists.
    ///
    /// # Errors
    /// - [`SurveyError::NoQuestions`] if `choice_names` is empty.
    /// - [`SurveyError::EmptyChoiceList`] if any question has no labels.
    pub fn new(choice_names: Vec<Vec<String>>) -> SurveyResult<Self> {
        if choice_names.is_empty() {
            return Err(SurveyError::NoQuestions);
        }
        for (qid, labels) in choice_names.iter().enumerate() {
            if labels.is_empty() {
                return Err(SurveyError::EmptyChoiceList { qid });
            }
        }
        let choice_counts = choice_names.iter().map(Vec::len).collect();
        Ok(SurveyDesign { choice_names, choice_counts })
    }

    /// Number of questions.
    pub fn nques(&self) -> usize {
        self.choice_counts.len()
    }

    /// Choice counts per question; also the contingency-table shape.
    pub fn choice_counts(&self) -> &[usize] {
        &self.choice_counts
    }

    /// Choice labels per question.
    pub fn choice_names(&self) -> &[Vec<String>] {
        &self.choice_names
    }

    /// A [`ConstraintBuilder`] over this design's table shape.
    pub fn constraint_builder(&self) -> ConstraintResult<ConstraintBuilder> {
        ConstraintBuilder::new(&self.choice_counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Count derivation from label lists.
    // - Construction guards for empty designs and empty label lists.
    // -------------------------------------------------------------------------

    fn labels(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter().map(|q| q.iter().map(|s| s.to_string()).collect()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify that choice counts are derived from the label lists.
    //
    // Given
    // -----
    // - Labels for a 2x5x3 survey.
    //
    // Expect
    // ------
    // - `choice_counts` is [2, 5, 3] and `nques` is 3.
    fn counts_derived_from_labels() {
        // Arrange
        let design = SurveyDesign::new(labels(&[
            &["Boy", "Girl"],
            &["0-15", "15-30", "30-45", "45-60", "60-+inf"],
            &["TAIHU", "LIANGXI", "Others"],
        ]))
        .unwrap();

        // Act / Assert
        assert_eq!(design.choice_counts(), &[2, 5, 3]);
        assert_eq!(design.nques(), 3);
        assert_eq!(design.choice_names()[2][1], "LIANGXI");
    }

    #[test]
    // Purpose
    // -------
    // Verify construction guards.
    //
    // Given
    // -----
    // - An empty design and one with a label-less question.
    //
    // Expect
    // ------
    // - `NoQuestions` and `EmptyChoiceList { qid: 1 }` respectively.
    fn construction_rejects_degenerate_designs() {
        // Act / Assert
        match SurveyDesign::new(vec![]) {
            Err(SurveyError::NoQuestions) => (),
            other => panic!("expected NoQuestions error, got {other:?}"),
        }
        match SurveyDesign::new(labels(&[&["Boy", "Girl"], &[]])) {
            Err(SurveyError::EmptyChoiceList { qid: 1 }) => (),
            other => panic!("expected EmptyChoiceList error, got {other:?}"),
        }
    }
}
