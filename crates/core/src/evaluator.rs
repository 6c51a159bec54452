//! Tolerance-aware scoring of submitted answers.

use crate::model::Problem;

/// Score `answer` against a reference value.
///
/// `tolerance` is read three ways: `0` demands an exact match, values below
/// `1` are a fraction of the reference magnitude, anything else is an absolute
/// margin.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn within_tolerance(correct: f64, tolerance: f64, answer: f64) -> bool {
    let diff = (correct - answer).abs();
    if tolerance == 0.0 {
        answer == correct
    } else if tolerance < 1.0 {
        diff <= (correct * tolerance).abs()
    } else {
        diff <= tolerance
    }
}

/// Score `answer` against `problem`.
#[must_use]
pub fn check_answer(problem: &Problem, answer: f64) -> bool {
    within_tolerance(problem.correct_answer(), problem.tolerance(), answer)
}

/// Parse raw user input into a finite number.
///
/// Returns `None` for blank or non-numeric input so callers can treat it as
/// "no submission" instead of a wrong answer.
#[must_use]
pub fn parse_answer(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ProblemDraft, ProblemId};

    fn problem(answer: f64, tolerance: f64) -> Problem {
        Problem::from_draft(
            ProblemId::generate(),
            Category::Crosswind,
            ProblemDraft::new("?", answer, tolerance, "knots"),
        )
    }

    #[test]
    fn zero_tolerance_is_exact() {
        let p = problem(180.0, 0.0);
        assert!(check_answer(&p, 180.0));
        assert!(!check_answer(&p, 180.01));
        assert!(!check_answer(&p, 179.0));
    }

    #[test]
    fn fractional_tolerance_is_relative() {
        let p = problem(100.0, 0.05);
        assert!(check_answer(&p, 105.0));
        assert!(check_answer(&p, 95.0));
        assert!(!check_answer(&p, 106.0));
    }

    #[test]
    fn relative_tolerance_uses_magnitude_for_negative_answers() {
        let p = problem(-10.0, 0.1);
        assert!(check_answer(&p, -11.0));
        assert!(!check_answer(&p, -11.5));
    }

    #[test]
    fn large_tolerance_is_absolute() {
        let p = problem(63.0, 2.0);
        assert!(check_answer(&p, 61.0));
        assert!(check_answer(&p, 65.0));
        assert!(!check_answer(&p, 60.0));
    }

    #[test]
    fn crosswind_example_scores_as_expected() {
        let p = problem(10.0, 2.0);
        assert!(check_answer(&p, 10.0));
        assert!(!check_answer(&p, 13.0));
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        assert_eq!(parse_answer(" 42.5 "), Some(42.5));
        assert_eq!(parse_answer("-7"), Some(-7.0));
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("abc"), None);
        assert_eq!(parse_answer("NaN"), None);
        assert_eq!(parse_answer("inf"), None);
    }
}
