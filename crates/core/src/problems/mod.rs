//! Problem Generator Engine.
//!
//! One generator per [`Category`], each drawing its operands from curated
//! pools through a [`Sampler`]. The public entry points take an optional
//! category and fall back to a uniform pick over all of them.

mod approach;
mod atmosphere;
mod conversions;
mod format;
mod fuel;
mod headings;
mod navigation;
mod wind;

pub use approach::{descent_planning, visual_descent_point};
pub use atmosphere::{cloud_base, isa_deviation, pressure_altitude, temp_conversion, true_airspeed};
pub use conversions::{fuel_weight, hours_to_decimal, unit_conversion, visibility_rvr};
pub use fuel::{fuel_dumping, fuel_endurance};
pub use headings::{compass_math, holding_pattern, magnetic_compass, reciprocal_heading};
pub use navigation::{
    glide_distance, slant_range, sixty_to_one, standard_rate_turn, time_speed_distance,
    turn_radius,
};
pub use wind::{crosswind, drift_angle, headwind_tailwind, hydroplaning};

pub use crate::evaluator::check_answer;

use crate::model::{Category, Problem, ProblemDraft, ProblemId};
use crate::random::{RngSampler, Sampler};

/// Every category that has a generator, in catalog order.
#[must_use]
pub fn all_categories() -> &'static [Category] {
    &Category::ALL
}

/// Generate one problem using the thread RNG.
#[must_use]
pub fn generate_problem(category: Option<Category>) -> Problem {
    generate_problem_with(category, &mut RngSampler::thread())
}

/// Generate one problem drawing every random choice from `sampler`.
pub fn generate_problem_with(category: Option<Category>, sampler: &mut dyn Sampler) -> Problem {
    let category = category.unwrap_or_else(|| sampler.pick(&Category::ALL));
    let draft = draft_for(category, sampler);
    Problem::from_draft(ProblemId::generate(), category, draft)
}

#[must_use]
pub fn generate_problems(count: usize, category: Option<Category>) -> Vec<Problem> {
    generate_problems_with(count, category, &mut RngSampler::thread())
}

/// Generate `count` independent problems. Without a category each one picks
/// its own.
pub fn generate_problems_with(
    count: usize,
    category: Option<Category>,
    sampler: &mut dyn Sampler,
) -> Vec<Problem> {
    (0..count)
        .map(|_| generate_problem_with(category, sampler))
        .collect()
}

fn draft_for(category: Category, s: &mut dyn Sampler) -> ProblemDraft {
    match category {
        Category::HoursToDecimal => hours_to_decimal(s),
        Category::ReciprocalHeading => reciprocal_heading(s),
        Category::Hydroplaning => hydroplaning(s),
        Category::TempConversion => temp_conversion(s),
        Category::IsaDeviation => isa_deviation(s),
        Category::PressureAltitude => pressure_altitude(s),
        Category::Crosswind => crosswind(s),
        Category::HeadwindTailwind => headwind_tailwind(s),
        Category::DriftAngle => drift_angle(s),
        Category::UnitConversion => unit_conversion(s),
        Category::VisibilityRvr => visibility_rvr(s),
        Category::FuelWeight => fuel_weight(s),
        Category::FuelDumping => fuel_dumping(s),
        Category::MagneticCompass => magnetic_compass(s),
        Category::SixtyToOne => sixty_to_one(s),
        Category::StandardRateTurn => standard_rate_turn(s),
        Category::TurnRadius => turn_radius(s),
        Category::TrueAirspeed => true_airspeed(s),
        Category::TimeSpeedDistance => time_speed_distance(s),
        Category::DescentPlanning => descent_planning(s),
        Category::VisualDescentPoint => visual_descent_point(s),
        Category::GlideDistance => glide_distance(s),
        Category::CloudBase => cloud_base(s),
        Category::HoldingPattern => holding_pattern(s),
        Category::FuelEndurance => fuel_endurance(s),
        Category::SlantRange => slant_range(s),
        Category::CompassMath => compass_math(s),
    }
}

/// Uniform integer in `min..=max` narrowed back to `i32`.
pub(crate) fn between(s: &mut dyn Sampler, min: i32, max: i32) -> i32 {
    i32::try_from(s.int_inclusive(i64::from(min), i64::from(max))).unwrap_or(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSampler;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ROUNDS: u64 = 300;

    #[test]
    fn every_category_scores_its_own_answer() {
        for category in Category::ALL {
            let mut sampler = RngSampler::new(StdRng::seed_from_u64(category as u64));
            for _ in 0..ROUNDS {
                let problem = generate_problem_with(Some(category), &mut sampler);
                assert_eq!(problem.category(), category);
                assert!(problem.correct_answer().is_finite(), "{category}");
                assert!(problem.tolerance() >= 0.0, "{category}");
                assert!(!problem.question().is_empty(), "{category}");
                assert!(!problem.explanation().is_empty(), "{category}");
                assert!(
                    check_answer(&problem, problem.correct_answer()),
                    "{category}: {} rejected its own answer",
                    problem.question()
                );
            }
        }
    }

    #[test]
    fn heading_answers_stay_in_compass_range() {
        let heading_categories = [
            Category::ReciprocalHeading,
            Category::MagneticCompass,
            Category::CompassMath,
        ];
        let mut sampler = RngSampler::new(StdRng::seed_from_u64(360));
        for category in heading_categories {
            for _ in 0..ROUNDS {
                let problem = generate_problem_with(Some(category), &mut sampler);
                let answer = problem.correct_answer();
                assert!(answer > 0.0 && answer <= 360.0, "{category}: {answer}");
                assert_eq!(answer.fract(), 0.0);
            }
        }
    }

    #[test]
    fn holding_outbound_heading_stays_in_range() {
        let mut sampler = RngSampler::new(StdRng::seed_from_u64(90));
        for _ in 0..ROUNDS {
            let problem = generate_problem_with(Some(Category::HoldingPattern), &mut sampler);
            if problem.unit() == "°" {
                let answer = problem.correct_answer();
                assert!(answer > 0.0 && answer <= 360.0, "{answer}");
            }
        }
    }

    #[test]
    fn omitted_category_picks_from_all() {
        // first draw picks the category index
        let mut sampler = ScriptedSampler::new([6, 4, 2]);
        let problem = generate_problem_with(None, &mut sampler);
        assert_eq!(problem.category(), Category::Crosswind);
        assert_eq!(problem.correct_answer(), 10.0);
        assert!(check_answer(&problem, 10.0));
        assert!(!check_answer(&problem, 13.0));
    }

    #[test]
    fn random_categories_cover_the_catalog() {
        let mut sampler = RngSampler::new(StdRng::seed_from_u64(27));
        let problems = generate_problems_with(2000, None, &mut sampler);
        for category in Category::ALL {
            assert!(
                problems.iter().any(|p| p.category() == category),
                "{category} never generated"
            );
        }
    }

    #[test]
    fn batch_respects_requested_category() {
        let problems = generate_problems(25, Some(Category::GlideDistance));
        assert_eq!(problems.len(), 25);
        assert!(
            problems
                .iter()
                .all(|p| p.category() == Category::GlideDistance)
        );
    }

    #[test]
    fn ids_are_fresh_per_problem() {
        let problems = generate_problems(50, None);
        let mut ids: Vec<_> = problems.iter().map(Problem::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn all_categories_lists_twenty_seven() {
        assert_eq!(all_categories().len(), 27);
    }
}
