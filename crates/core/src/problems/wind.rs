use crate::model::ProblemDraft;
use crate::numeric::round_half_up;
use crate::random::Sampler;

use super::format::{fixed, num};

pub fn crosswind(s: &mut dyn Sampler) -> ProblemDraft {
    let wind = s.pick(&[10, 12, 15, 18, 20, 22, 25, 28, 30, 35]);
    let angle = s.pick(&[15, 20, 30, 40, 45, 50, 60, 70, 75, 90]);

    let component = f64::from(wind) * f64::from(angle).to_radians().sin();
    let answer = round_half_up(component);
    let share = round_half_up(component / f64::from(wind) * 100.0);

    ProblemDraft::new(
        format!(
            "Wind is {wind} knots at {angle}° off the runway. What is the crosswind component?"
        ),
        answer,
        2.0,
        "knots",
    )
    .hint("30°=50%, 45°=70%, 60°=90%, 90°=100%")
    .explanation(format!(
        "At {angle}° angle: crosswind ≈ {} knots ({}% of {wind} kts)",
        num(answer),
        num(share)
    ))
}

pub fn headwind_tailwind(s: &mut dyn Sampler) -> ProblemDraft {
    let wind = s.pick(&[10, 15, 20, 25, 30, 35, 40]);
    let angle = s.pick(&[0, 15, 20, 30, 40, 45, 50, 60]);
    let kind = if s.chance() { "headwind" } else { "tailwind" };

    let component = f64::from(wind) * f64::from(angle).to_radians().cos();
    let answer = round_half_up(component);
    let share = round_half_up(component / f64::from(wind) * 100.0);

    ProblemDraft::new(
        format!("Wind is {wind} knots at {angle}° off the runway. What is the {kind} component?"),
        answer,
        2.0,
        "knots",
    )
    .hint("0°=100%, 30°=90%, 45°=70%, 60°=50%")
    .explanation(format!(
        "At {angle}° angle: {kind} ≈ {} knots ({}% of {wind} kts)",
        num(answer),
        num(share)
    ))
}

const DRIFT_CROSSWINDS: [i32; 12] = [6, 8, 10, 12, 15, 18, 20, 24, 30, 36, 40, 48];

pub fn drift_angle(s: &mut dyn Sampler) -> ProblemDraft {
    let tas = s.pick(&[90, 120, 150, 180, 240, 300, 360, 420, 480]);
    // Keep drift under ~15°: the slowest TAS still admits 6..=20 kt.
    let pool: Vec<i32> = DRIFT_CROSSWINDS
        .into_iter()
        .filter(|xw| xw * 4 <= tas)
        .collect();
    let crosswind = s.pick(&pool);

    let drift = f64::from(crosswind * 60) / f64::from(tas);

    ProblemDraft::new(
        format!("At {tas} KTAS with a {crosswind}-knot crosswind, what is your drift angle?"),
        round_half_up(drift),
        1.0,
        "°",
    )
    .hint("Drift = (Crosswind × 60) ÷ TAS")
    .explanation(format!(
        "Drift = ({crosswind} × 60) ÷ {tas} = {} ÷ {tas} = {}°",
        crosswind * 60,
        fixed(drift, 1)
    ))
}

pub fn hydroplaning(s: &mut dyn Sampler) -> ProblemDraft {
    let psi = s.pick(&[50, 80, 100, 120, 144, 150, 169, 180, 196, 200, 225]);
    let root = f64::from(psi).sqrt();
    let answer = round_half_up(9.0 * root);

    ProblemDraft::new(
        format!("Main tire pressure is {psi} psi. What is the hydroplaning speed?"),
        answer,
        2.0,
        "knots",
    )
    .hint("V = 9 × √(tire pressure)")
    .explanation(format!(
        "V = 9 × √{psi} = 9 × {} = {} knots",
        fixed(root, 1),
        num(answer)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSampler;

    #[test]
    fn crosswind_twenty_knots_at_thirty_degrees_is_ten() {
        let mut sampler = ScriptedSampler::new([4, 2]);
        let draft = crosswind(&mut sampler);

        assert_eq!(draft.correct_answer, 10.0);
        assert_eq!(draft.tolerance, 2.0);
        assert!(draft.explanation.contains("50% of 20 kts"));
    }

    #[test]
    fn headwind_at_zero_degrees_is_full_wind() {
        let mut sampler = ScriptedSampler::new([6, 0, 1]);
        let draft = headwind_tailwind(&mut sampler);

        assert_eq!(draft.correct_answer, 40.0);
        assert!(draft.question.contains("headwind"));
    }

    #[test]
    fn drift_pool_respects_quarter_tas() {
        // TAS 90 leaves 6..=20 kt; index 6 is 20 kt
        let mut sampler = ScriptedSampler::new([0, 6]);
        let draft = drift_angle(&mut sampler);
        assert_eq!(draft.correct_answer, 13.0);

        // index 7 wraps back to the first entry
        let mut sampler = ScriptedSampler::new([0, 7]);
        let draft = drift_angle(&mut sampler);
        assert!(draft.question.contains("6-knot"));
    }

    #[test]
    fn hydroplaning_uses_square_root() {
        let mut sampler = ScriptedSampler::new([4]);
        let draft = hydroplaning(&mut sampler);
        assert_eq!(draft.correct_answer, 108.0);
        assert_eq!(draft.explanation, "V = 9 × √144 = 9 × 12.0 = 108 knots");
    }
}
