use crate::model::ProblemDraft;
use crate::numeric::{round_half_up, round_to};
use crate::random::Sampler;

use super::between;
use super::format::{fixed, num, thousands};

const NM_TO_SM: f64 = 1.15;

pub fn hours_to_decimal(s: &mut dyn Sampler) -> ProblemDraft {
    let hours = between(s, 0, 5);
    let minutes = s.pick(&[
        0, 3, 6, 9, 12, 15, 18, 21, 24, 27, 30, 33, 36, 39, 42, 45, 48, 51, 54, 57,
    ]);
    let decimal = f64::from(hours) + f64::from(minutes) / 60.0;

    ProblemDraft::new(
        format!("Convert {hours}:{minutes:02} to decimal hours"),
        round_to(decimal, 2),
        0.01,
        "hours",
    )
    .hint("Every 6 minutes = 0.1 hour")
    .explanation(format!(
        "{hours}:{minutes:02} = {hours} + ({minutes}/60) = {} hours",
        fixed(decimal, 2)
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitMode {
    NmToSm,
    SmToNm,
    KnotsToMph,
    MphToKnots,
    KnotsToNmPerMinute,
}

pub fn unit_conversion(s: &mut dyn Sampler) -> ProblemDraft {
    let mode = s.pick(&[
        UnitMode::NmToSm,
        UnitMode::SmToNm,
        UnitMode::KnotsToMph,
        UnitMode::MphToKnots,
        UnitMode::KnotsToNmPerMinute,
    ]);
    let distances = [50, 75, 100, 150, 200, 250, 300];
    let speeds = [100, 150, 200, 250, 300, 350, 400];

    match mode {
        UnitMode::NmToSm => {
            let nm = s.pick(&distances);
            let answer = round_half_up(f64::from(nm) * NM_TO_SM);
            ProblemDraft::new(
                format!("Convert {nm} nautical miles to statute miles"),
                answer,
                3.0,
                "SM",
            )
            .hint("1 NM = 1.15 SM")
            .explanation(format!("{nm} NM × 1.15 = {} SM", num(answer)))
        }
        UnitMode::SmToNm => {
            let sm = s.pick(&distances);
            let answer = round_half_up(f64::from(sm) / NM_TO_SM);
            ProblemDraft::new(
                format!("Convert {sm} statute miles to nautical miles"),
                answer,
                3.0,
                "NM",
            )
            .hint("1 SM = 0.87 NM")
            .explanation(format!("{sm} SM ÷ 1.15 = {} NM", num(answer)))
        }
        UnitMode::KnotsToMph => {
            let knots = s.pick(&speeds);
            let answer = round_half_up(f64::from(knots) * NM_TO_SM);
            ProblemDraft::new(
                format!("Convert {knots} knots to miles per hour"),
                answer,
                5.0,
                "MPH",
            )
            .hint("1 knot = 1.15 MPH")
            .explanation(format!("{knots} knots × 1.15 = {} MPH", num(answer)))
        }
        UnitMode::MphToKnots => {
            let mph = s.pick(&speeds);
            let answer = round_half_up(f64::from(mph) / NM_TO_SM);
            ProblemDraft::new(
                format!("Convert {mph} MPH to knots"),
                answer,
                5.0,
                "knots",
            )
            .hint("1 MPH = 0.87 knots")
            .explanation(format!("{mph} MPH ÷ 1.15 = {} knots", num(answer)))
        }
        UnitMode::KnotsToNmPerMinute => {
            let knots = s.pick(&[60, 90, 120, 180, 240, 300, 360, 420, 480]);
            let per_minute = f64::from(knots) / 60.0;
            ProblemDraft::new(
                format!("At {knots} knots, how many nautical miles per minute?"),
                per_minute,
                0.1,
                "NM/min",
            )
            .hint("60 knots = 1 NM/min")
            .explanation(format!("{knots} knots ÷ 60 = {} NM/min", num(per_minute)))
        }
    }
}

const RVR_TABLE: [(&str, i32); 5] = [
    ("1/4", 1600),
    ("1/2", 2400),
    ("3/4", 4000),
    ("1", 5000),
    ("1 1/2", 6000),
];

pub fn visibility_rvr(s: &mut dyn Sampler) -> ProblemDraft {
    let (visibility, rvr) = s.pick(&RVR_TABLE);

    ProblemDraft::new(
        format!("What is the RVR equivalent of {visibility} statute mile visibility?"),
        f64::from(rvr),
        0.0,
        "feet",
    )
    .hint("1/4=1600, 1/2=2400, 3/4=4000, 1=5000, 1.5=6000")
    .explanation(format!("{visibility} SM = {rvr} feet RVR"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fuel {
    Avgas,
    JetA,
}

impl Fuel {
    fn name(self) -> &'static str {
        match self {
            Fuel::Avgas => "Avgas",
            Fuel::JetA => "Jet A",
        }
    }

    fn pounds_per_gallon(self) -> f64 {
        match self {
            Fuel::Avgas => 6.0,
            Fuel::JetA => 6.7,
        }
    }
}

pub fn fuel_weight(s: &mut dyn Sampler) -> ProblemDraft {
    let fuel = s.pick(&[Fuel::Avgas, Fuel::JetA]);
    let density = fuel.pounds_per_gallon();
    let name = fuel.name();
    let hint = format!("{name}: {} lbs/gal", fixed(density, 1));

    if s.chance() {
        let gallons = s.pick(&[50, 75, 100, 150, 200, 250, 300, 400, 500]);
        let answer = round_half_up(f64::from(gallons) * density);
        ProblemDraft::new(
            format!("How many pounds is {gallons} gallons of {name}?"),
            answer,
            10.0,
            "lbs",
        )
        .hint(hint)
        .explanation(format!(
            "{gallons} gal × {} lbs/gal = {} lbs",
            num(density),
            num(answer)
        ))
    } else {
        let pounds = s.pick(&[300, 500, 750, 1000, 1500, 2000, 3000, 5000]);
        let answer = round_half_up(f64::from(pounds) / density);
        ProblemDraft::new(
            format!("How many gallons is {} lbs of {name}?", thousands(pounds)),
            answer,
            5.0,
            "gallons",
        )
        .hint(hint)
        .explanation(format!(
            "{pounds} lbs ÷ {} lbs/gal = {} gallons",
            num(density),
            num(answer)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSampler;

    #[test]
    fn quarter_hour_converts_to_quarter() {
        // 2 hours, 45 minutes
        let mut sampler = ScriptedSampler::new([2, 15]);
        let draft = hours_to_decimal(&mut sampler);
        assert_eq!(draft.correct_answer, 2.75);
        assert_eq!(draft.question, "Convert 2:45 to decimal hours");
        assert_eq!(draft.tolerance, 0.01);
    }

    #[test]
    fn zero_minutes_pads() {
        let mut sampler = ScriptedSampler::new([0, 0]);
        let draft = hours_to_decimal(&mut sampler);
        assert_eq!(draft.correct_answer, 0.0);
        assert!(draft.question.contains("0:00"));
    }

    #[test]
    fn nautical_to_statute() {
        // nm-to-sm, 100 NM
        let mut sampler = ScriptedSampler::new([0, 2]);
        let draft = unit_conversion(&mut sampler);
        assert_eq!(draft.correct_answer, 115.0);
        assert_eq!(draft.unit, "SM");
    }

    #[test]
    fn knots_to_nm_per_minute_is_exact() {
        let mut sampler = ScriptedSampler::new([4, 1]);
        let draft = unit_conversion(&mut sampler);
        assert_eq!(draft.correct_answer, 1.5);
        assert_eq!(draft.tolerance, 0.1);
    }

    #[test]
    fn rvr_table_lookup() {
        let mut sampler = ScriptedSampler::new([4]);
        let draft = visibility_rvr(&mut sampler);
        assert_eq!(draft.correct_answer, 6000.0);
        assert!(draft.question.contains("1 1/2 statute mile"));
    }

    #[test]
    fn jet_a_gallons_to_pounds() {
        // Jet A, to-weight, 50 gallons
        let mut sampler = ScriptedSampler::new([1, 1, 0]);
        let draft = fuel_weight(&mut sampler);
        assert_eq!(draft.correct_answer, 335.0);
        assert_eq!(draft.hint.as_deref(), Some("Jet A: 6.7 lbs/gal"));
    }

    #[test]
    fn avgas_pounds_to_gallons() {
        // Avgas, to-gallons, 3000 lbs
        let mut sampler = ScriptedSampler::new([0, 0, 6]);
        let draft = fuel_weight(&mut sampler);
        assert_eq!(draft.correct_answer, 500.0);
        assert!(draft.question.contains("3,000 lbs"));
    }
}
