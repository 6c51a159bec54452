use serde::{Deserialize, Serialize};

use crate::model::{Category, Problem, ProblemId};

/// Record of one answered problem.
///
/// Appended to the attempt log at submission time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResult {
    pub problem_id: ProblemId,
    pub category: Category,
    /// `None` when the problem was recorded without a numeric answer.
    pub user_answer: Option<f64>,
    pub correct_answer: f64,
    pub is_correct: bool,
    /// Whole seconds spent on the problem.
    pub time_spent: u32,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl ProblemResult {
    #[must_use]
    pub fn new(
        problem: &Problem,
        user_answer: Option<f64>,
        is_correct: bool,
        time_spent: u32,
        timestamp: i64,
    ) -> Self {
        Self {
            problem_id: problem.id(),
            category: problem.category(),
            user_answer,
            correct_answer: problem.correct_answer(),
            is_correct,
            time_spent,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProblemDraft;

    #[test]
    fn result_copies_problem_identity() {
        let problem = Problem::from_draft(
            ProblemId::generate(),
            Category::FuelWeight,
            ProblemDraft::new("How heavy?", 335.0, 10.0, "lbs"),
        );
        let result = ProblemResult::new(&problem, Some(330.0), true, 7, 1_700_000_000_000);

        assert_eq!(result.problem_id, problem.id());
        assert_eq!(result.category, Category::FuelWeight);
        assert_eq!(result.correct_answer, 335.0);
        assert_eq!(result.time_spent, 7);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let problem = Problem::from_draft(
            ProblemId::generate(),
            Category::Crosswind,
            ProblemDraft::new("Crosswind?", 10.0, 2.0, "knots"),
        );
        let result = ProblemResult::new(&problem, None, false, 3, 42);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["category"], "crosswind");
        assert_eq!(json["userAnswer"], serde_json::Value::Null);
        assert_eq!(json["isCorrect"], false);
        assert_eq!(json["timeSpent"], 3);
    }
}
