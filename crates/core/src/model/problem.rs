
use crate::model::{Category, ProblemId};

/// Generator output before an identity is stamped on it.
///
/// Generators only decide the numbers and the text; `Problem::from_draft` owns
/// the id and category so a generator can never mislabel what it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemDraft {
    pub question: String,
    pub correct_answer: f64,
    /// `0` exact, `< 1` fraction of the answer, `>= 1` absolute margin.
    pub tolerance: f64,
    pub unit: &'static str,
    pub hint: Option<String>,
    pub explanation: String,
}

impl ProblemDraft {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        correct_answer: f64,
        tolerance: f64,
        unit: &'static str,
    ) -> Self {
        Self {
            question: question.into(),
            correct_answer,
            tolerance,
            unit,
            hint: None,
            explanation: String::new(),
        }
    }

    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// One generated exercise. Immutable once created and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    id: ProblemId,
    category: Category,
    question: String,
    correct_answer: f64,
    tolerance: f64,
    unit: String,
    hint: Option<String>,
    explanation: String,
}

impl Problem {
    #[must_use]
    pub fn from_draft(id: ProblemId, category: Category, draft: ProblemDraft) -> Self {
        debug_assert!(
            draft.tolerance >= 0.0,
            "{category} produced a negative tolerance"
        );
        Self {
            id,
            category,
            question: draft.question,
            correct_answer: draft.correct_answer,
            tolerance: draft.tolerance,
            unit: draft.unit.to_string(),
            hint: draft.hint,
            explanation: draft.explanation,
        }
    }

    #[must_use]
    pub fn id(&self) -> ProblemId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn correct_answer(&self) -> f64 {
        self.correct_answer
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}
