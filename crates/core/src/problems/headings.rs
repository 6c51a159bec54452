use crate::model::ProblemDraft;
use crate::numeric::round_half_up;
use crate::random::Sampler;

use super::between;
use super::format::normalize_heading;

pub fn reciprocal_heading(s: &mut dyn Sampler) -> ProblemDraft {
    let heading = between(s, 1, 360);
    let (reciprocal, explanation) = if heading <= 180 {
        let r = heading + 180;
        (r, format!("{heading}° + 200 - 20 = {r}°"))
    } else {
        let r = heading - 180;
        (r, format!("{heading}° - 200 + 20 = {r}°"))
    };

    ProblemDraft::new(
        format!("What is the reciprocal of heading {heading:03}°?"),
        f64::from(reciprocal),
        0.0,
        "°",
    )
    .hint("Add 200, subtract 20 (or vice versa)")
    .explanation(explanation)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toward {
    North,
    South,
}

/// Rollout lead for compass turns: undershoot north, overshoot south.
pub fn magnetic_compass(s: &mut dyn Sampler) -> ProblemDraft {
    let bank = s.pick(&[15, 20, 25]);
    let latitude = s.pick(&[30, 35, 40, 45]);
    let toward = s.pick(&[Toward::North, Toward::South]);
    let turn = s.pick(&["left", "right"]);

    // bank / 3 to the nearest degree
    let lead = (bank + 1) / 3 + latitude;
    let (desired, rollout) = match toward {
        Toward::North => {
            let desired = s.pick(&[350, 355, 360, 5, 10, 15]);
            let mut rollout = desired - lead;
            if rollout <= 0 {
                rollout += 360;
            }
            (desired, rollout)
        }
        Toward::South => {
            let desired = s.pick(&[165, 170, 175, 180, 185, 190, 195]);
            let mut rollout = desired + lead;
            if rollout > 360 {
                rollout -= 360;
            }
            (desired, rollout)
        }
    };

    let (verb, op) = match toward {
        Toward::North => ("Undershoot", '-'),
        Toward::South => ("Overshoot", '+'),
    };
    let normal_lead = lead - latitude;

    ProblemDraft::new(
        format!(
            "Using magnetic compass only at {latitude}°N, turning {turn} to {desired}° with {bank}° bank. At what compass reading do you start rollout?"
        ),
        f64::from(rollout),
        3.0,
        "°",
    )
    .hint("UNOS: Undershoot North, Overshoot South. Lead = (bank÷3) + latitude")
    .explanation(format!(
        "Lead = {normal_lead}° + {latitude}° latitude = {lead}°. {verb}: {desired}° {op} {lead}° = {rollout}°"
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompassOp {
    Right90,
    Left90,
    Plus(i32),
    Minus(i32),
}

const COMPASS_OPS: [CompassOp; 8] = [
    CompassOp::Right90,
    CompassOp::Left90,
    CompassOp::Plus(30),
    CompassOp::Minus(30),
    CompassOp::Plus(45),
    CompassOp::Minus(45),
    CompassOp::Plus(210),
    CompassOp::Minus(210),
];

pub fn compass_math(s: &mut dyn Sampler) -> ProblemDraft {
    let heading = between(s, 1, 36) * 10;
    let op = s.pick(&COMPASS_OPS);

    let (question, answer, hint, explanation) = match op {
        CompassOp::Right90 => {
            let answer = normalize_heading(heading + 90);
            (
                "What heading after a RIGHT 90° turn?".to_string(),
                answer,
                "Right 90°: Add 100, subtract 10".to_string(),
                format!("{heading} + 100 = {}, then - 10 = {answer}°", heading + 100),
            )
        }
        CompassOp::Left90 => {
            let answer = normalize_heading(heading - 90);
            (
                "What heading after a LEFT 90° turn?".to_string(),
                answer,
                "Left 90°: Subtract 100, add 10".to_string(),
                format!("{heading} - 100 = {}, then + 10 = {answer}°", heading - 100),
            )
        }
        CompassOp::Plus(delta) => {
            let raw = heading + delta;
            let answer = normalize_heading(raw);
            let wrap = if raw > 360 {
                format!("{raw} - 360 = ")
            } else {
                String::new()
            };
            (
                format!("Add {delta}°. What is the new heading?"),
                answer,
                offset_hint(delta, "Add"),
                format!("{heading} + {delta} = {wrap}{answer}°"),
            )
        }
        CompassOp::Minus(delta) => {
            let raw = heading - delta;
            let answer = normalize_heading(raw);
            let wrap = if raw <= 0 {
                format!("{raw} + 360 = ")
            } else {
                String::new()
            };
            (
                format!("Subtract {delta}°. What is the new heading?"),
                answer,
                offset_hint(delta, "Subtract"),
                format!("{heading} - {delta} = {wrap}{answer}°"),
            )
        }
    };

    ProblemDraft::new(
        format!("Heading {heading:03}°. {question}"),
        f64::from(answer),
        0.0,
        "°",
    )
    .hint(hint)
    .explanation(explanation)
}

fn offset_hint(delta: i32, verb: &str) -> String {
    match delta {
        30 => format!("{verb} 30° and wrap at 360° if needed. Used for teardrop hold entries."),
        45 => format!("{verb} 45° and wrap at 360° if needed. Common for intercept angles."),
        _ if verb == "Add" => {
            "Add 210°: same as subtracting 150°. Used for parallel hold entries.".to_string()
        }
        _ => "Subtract 210°: same as adding 150°. Used for parallel hold entries.".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldWind {
    DirectTail,
    QuarteringTail,
    DirectHead,
    QuarteringHead,
}

impl HoldWind {
    fn describe(self) -> &'static str {
        match self {
            HoldWind::DirectTail => "direct tailwind",
            HoldWind::QuarteringTail => "quartering tailwind (45°)",
            HoldWind::DirectHead => "direct headwind",
            HoldWind::QuarteringHead => "quartering headwind (45°)",
        }
    }

    fn is_tail(self) -> bool {
        matches!(self, HoldWind::DirectTail | HoldWind::QuarteringTail)
    }

    fn is_quartering(self) -> bool {
        matches!(self, HoldWind::QuarteringTail | HoldWind::QuarteringHead)
    }

    /// Seconds added to the one-minute outbound leg.
    #[allow(clippy::cast_possible_truncation)]
    fn correction(self, wind: i32) -> i32 {
        let half = round_half_up(f64::from(wind) * 0.5) as i32;
        match self {
            HoldWind::DirectTail => -wind,
            HoldWind::QuarteringTail => -half,
            HoldWind::DirectHead => wind,
            HoldWind::QuarteringHead => half,
        }
    }
}

pub fn holding_pattern(s: &mut dyn Sampler) -> ProblemDraft {
    if s.chance() {
        holding_outbound_timing(s)
    } else {
        holding_outbound_heading(s)
    }
}

fn holding_outbound_heading(s: &mut dyn Sampler) -> ProblemDraft {
    let inbound = s.pick(&[360, 30, 60, 90, 120, 150, 180, 210, 240, 270, 300, 330]);
    let wca = s.pick(&[4, 5, 6, 7, 8, 10, 12]);
    let wind_from_left = s.chance();

    let outbound_course = if inbound <= 180 {
        inbound + 180
    } else {
        inbound - 180
    };
    let triple = wca * 3;
    let (raw, op, side) = if wind_from_left {
        (outbound_course + triple, '+', "left")
    } else {
        (outbound_course - triple, '-', "right")
    };
    let heading = normalize_heading(raw);

    ProblemDraft::new(
        format!(
            "Holding inbound {inbound:03}°, WCA is {wca}° (wind from {side}). What is the outbound heading?"
        ),
        f64::from(heading),
        1.0,
        "°",
    )
    .hint("Outbound heading = Reciprocal ± (3 × WCA). Triple correction compensates for turns.")
    .explanation(format!(
        "Outbound course = {outbound_course}°. Triple WCA = {wca} × 3 = {triple}°. {outbound_course}° {op} {triple}° = {heading}°"
    ))
}

fn holding_outbound_timing(s: &mut dyn Sampler) -> ProblemDraft {
    let wind = s.pick(&[10, 15, 20, 25, 30]);
    let kind = s.pick(&[
        HoldWind::DirectTail,
        HoldWind::QuarteringTail,
        HoldWind::DirectHead,
        HoldWind::QuarteringHead,
    ]);

    let correction = kind.correction(wind);
    let outbound = 60 + correction;
    let rate = if kind.is_quartering() { "0.5" } else { "1" };
    let (hint, effect) = if kind.is_tail() {
        ("Tailwind: subtract", "Tailwind shortens")
    } else {
        ("Headwind: add", "Headwind lengthens")
    };
    let sign = if correction >= 0 { '+' } else { '-' };

    ProblemDraft::new(
        format!(
            "Holding with {wind} kt {} on outbound leg. What outbound time for 1-min inbound?",
            kind.describe()
        ),
        f64::from(outbound),
        2.0,
        "seconds",
    )
    .hint(format!("{hint} {rate} sec/kt"))
    .explanation(format!(
        "{effect} outbound. {wind} kt × {rate} = {} sec. 60 {sign} {} = {outbound} sec",
        correction.abs(),
        correction.abs()
    ))
}
