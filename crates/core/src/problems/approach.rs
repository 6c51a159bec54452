use crate::model::ProblemDraft;
use crate::numeric::round_to;
use crate::random::Sampler;

use super::format::{clock, fixed, num, thousands};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DescentMode {
    Distance,
    TopOfDescent,
    DescentRate,
    PitchAngle,
    AltitudeAtDistance,
}

/// (altitude to lose in ft, distance in NM)
const PITCH_SCENARIOS: [(i32, i32); 10] = [
    (5000, 10),
    (4000, 20),
    (7000, 28),
    (6000, 20),
    (8000, 40),
    (10_000, 50),
    (12_000, 40),
    (15_000, 50),
    (19_000, 35),
    (23_000, 70),
];

pub fn descent_planning(s: &mut dyn Sampler) -> ProblemDraft {
    match s.pick(&[
        DescentMode::Distance,
        DescentMode::TopOfDescent,
        DescentMode::DescentRate,
        DescentMode::PitchAngle,
        DescentMode::AltitudeAtDistance,
    ]) {
        DescentMode::Distance => {
            let thousands_ft = s.pick(&[6, 8, 10, 12, 15, 18, 20, 24, 30]);
            let distance = thousands_ft * 3;
            ProblemDraft::new(
                format!(
                    "You need to descend {thousands_ft},000 feet. Using 3-to-1 rule, how many NM needed?"
                ),
                f64::from(distance),
                0.0,
                "NM",
            )
            .hint("3-to-1: Distance = Altitude (1000s) × 3")
            .explanation(format!("{thousands_ft} × 3 = {distance} NM"))
        }
        DescentMode::TopOfDescent => {
            let cruise = s.pick(&[25_000, 28_000, 31_000, 35_000, 37_000, 39_000]);
            let target = s.pick(&[8000, 10_000, 11_000, 12_000]);
            let restriction = s.pick(&[15, 20, 25, 30]);

            let to_lose = (cruise - target) / 1000;
            let descent = to_lose * 3;
            let top = restriction + descent;
            ProblemDraft::new(
                format!(
                    "Cruising at FL{}, need to cross {restriction} DME at {},000 ft. At what DME start descent?",
                    cruise / 100,
                    target / 1000
                ),
                f64::from(top),
                2.0,
                "DME",
            )
            .hint("3-to-1: Distance = Altitude (1000s) × 3, then add restriction DME")
            .explanation(format!(
                "Lose {to_lose}K ft × 3 = {descent} NM. Start at {restriction} + {descent} = {top} DME"
            ))
        }
        DescentMode::DescentRate => {
            let gs = s.pick(&[100, 120, 140, 150, 160, 180, 200, 220, 240, 280, 300]);
            let rate = gs * 5;
            ProblemDraft::new(
                format!(
                    "Flying a 3° descent at {gs} knots ground speed. What descent rate is required?"
                ),
                f64::from(rate),
                10.0,
                "fpm",
            )
            .hint("Descent Rate = Ground Speed × 5")
            .explanation(format!("{gs} kts × 5 = {rate} fpm"))
        }
        DescentMode::PitchAngle => {
            let (altitude, distance) = s.pick(&PITCH_SCENARIOS);
            let pitch = f64::from(altitude) / f64::from(distance * 100);
            ProblemDraft::new(
                format!(
                    "Descend {} ft over {distance} NM. What pitch angle is needed?",
                    thousands(altitude)
                ),
                round_to(pitch, 1),
                0.3,
                "° nose down",
            )
            .hint("Pitch = Altitude ÷ (Distance × 100)")
            .explanation(format!(
                "{} ÷ ({distance} × 100) = {}° nose down",
                thousands(altitude),
                fixed(pitch, 1)
            ))
        }
        DescentMode::AltitudeAtDistance => {
            let distance = s.pick(&[3, 4, 5, 6, 8, 10, 12]);
            let field = s.pick(&[0, 500, 1000, 1500, 2000, 3000, 5000]);
            // 3° glidepath at roughly 300 ft per NM
            let agl = distance * 300;
            let msl = agl + field;
            ProblemDraft::new(
                format!(
                    "Visual approach, field elevation {}' MSL. What altitude at {distance} NM for 3° glidepath?",
                    thousands(field)
                ),
                f64::from(msl),
                100.0,
                "ft MSL",
            )
            .hint("3° glidepath ≈ 300 ft/NM. Altitude = (Distance × 300) + Field Elevation")
            .explanation(format!(
                "{distance} NM × 300 ft/NM = {agl}' AGL. {agl} + {field}' = {msl}' MSL"
            ))
        }
    }
}

/// VDP for non-precision approaches, by DME or by timing from the FAF.
pub fn visual_descent_point(s: &mut dyn Sampler) -> ProblemDraft {
    if s.chance() {
        let hat = s.pick(&[300, 350, 400, 450, 500]);
        let approach = s.pick(&[120, 135, 150, 165, 180, 195, 210]);
        // HAT ÷ 10 is the seconds needed at 600 fpm.
        let descent = hat / 10;
        let vdp = approach - descent;
        ProblemDraft::new(
            format!(
                "HAT is {hat} ft, approach timing is {}. At what time from FAF is the VDP?",
                clock(approach)
            ),
            f64::from(vdp),
            5.0,
            "seconds",
        )
        .hint("VDP Time = Approach Time - (HAT ÷ 10)")
        .explanation(format!(
            "HAT {hat} ÷ 10 = {descent} sec descent time. {} - {descent} sec = {} ({vdp} sec)",
            clock(approach),
            clock(vdp)
        ))
    } else {
        let hat = s.pick(&[300, 350, 390, 400, 450, 480, 500, 550, 600]);
        let threshold = s.pick(&[1.0, 1.2, 1.5, 1.6, 1.8, 2.0, 2.2, 2.5]);
        let descent = f64::from(hat) / 300.0;
        let vdp = descent + threshold;
        ProblemDraft::new(
            format!(
                "MDA HAT is {hat} ft, runway threshold at {} DME. What is the VDP?",
                num(threshold)
            ),
            round_to(vdp, 1),
            0.2,
            "DME",
        )
        .hint("VDP = (HAT ÷ 300) + Threshold DME")
        .explanation(format!(
            "HAT {hat} ÷ 300 = {} NM descent distance. Add threshold {} DME = {} DME",
            fixed(descent, 2),
            num(threshold),
            fixed(vdp, 1)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSampler;

    #[test]
    fn three_to_one_distance() {
        let mut sampler = ScriptedSampler::new([0, 2]);
        let draft = descent_planning(&mut sampler);
        assert_eq!(draft.correct_answer, 30.0);
        assert_eq!(draft.tolerance, 0.0);
    }

    #[test]
    fn top_of_descent_adds_restriction() {
        // FL350 to 10,000 at 20 DME: 25 × 3 + 20
        let mut sampler = ScriptedSampler::new([1, 3, 1, 1]);
        let draft = descent_planning(&mut sampler);
        assert_eq!(draft.correct_answer, 95.0);
        assert!(draft.question.contains("FL350"));
        assert!(draft.question.contains("10,000 ft"));
    }

    #[test]
    fn pitch_angle_is_relative_tolerance() {
        // 19,000 ft over 35 NM = 5.43
        let mut sampler = ScriptedSampler::new([3, 8]);
        let draft = descent_planning(&mut sampler);
        assert_eq!(draft.correct_answer, 5.4);
        assert_eq!(draft.tolerance, 0.3);
    }

    #[test]
    fn altitude_at_distance_adds_field_elevation() {
        let mut sampler = ScriptedSampler::new([4, 4, 2]);
        let draft = descent_planning(&mut sampler);
        assert_eq!(draft.correct_answer, 3400.0);
    }

    #[test]
    fn vdp_by_dme() {
        // HAT 400, threshold 1.5
        let mut sampler = ScriptedSampler::new([0, 3, 2]);
        let draft = visual_descent_point(&mut sampler);
        assert_eq!(draft.correct_answer, 2.8);
        assert_eq!(draft.unit, "DME");
    }

    #[test]
    fn vdp_by_timing_formats_clock() {
        // HAT 350, approach 2:15
        let mut sampler = ScriptedSampler::new([1, 1, 1]);
        let draft = visual_descent_point(&mut sampler);
        assert_eq!(draft.correct_answer, 100.0);
        assert!(draft.question.contains("2:15"));
        assert!(draft.explanation.contains("= 1:40 (100 sec)"));
    }
}
