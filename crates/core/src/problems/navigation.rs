use crate::model::ProblemDraft;
use crate::numeric::{round_half_up, round_to};
use crate::random::Sampler;

use super::format::{fixed, num, thousands};

/// Feet of altitude per nautical mile for DME and glide rules of thumb.
const FEET_PER_NM: f64 = 6000.0;

pub fn sixty_to_one(s: &mut dyn Sampler) -> ProblemDraft {
    let dme = s.pick(&[10, 12, 15, 20, 30, 45, 60]);
    let per_mile = 60.0 / f64::from(dme);

    if s.chance() {
        let radials = s.pick(&[20, 24, 30, 36, 40, 45, 50, 60]);
        let arc = f64::from(radials) / per_mile;
        ProblemDraft::new(
            format!("Flying a {dme} NM arc, crossing {radials} radials. What is the arc distance?"),
            round_to(arc, 1),
            0.5,
            "NM",
        )
        .hint("Arc distance = Radials ÷ (60 ÷ DME)")
        .explanation(format!(
            "Radials per NM = {}. Arc = {radials} ÷ {} = {} NM",
            num(per_mile),
            num(per_mile),
            fixed(arc, 1)
        ))
    } else {
        ProblemDraft::new(
            format!("At {dme} DME, how many radials per nautical mile?"),
            per_mile,
            0.5,
            "radials/NM",
        )
        .hint("Radials per mile = 60 ÷ DME")
        .explanation(format!("60 ÷ {dme} = {} radials per NM", num(per_mile)))
    }
}

pub fn standard_rate_turn(s: &mut dyn Sampler) -> ProblemDraft {
    let tas = s.pick(&[90, 100, 120, 150, 180, 200, 240, 280]);
    let raw = f64::from(tas) / 10.0 * 1.5;
    let bank = raw.min(30.0);
    let limited = if raw >= 30.0 {
        " → limited to 30° for IFR"
    } else {
        ""
    };

    ProblemDraft::new(
        format!("What bank angle for a standard rate turn at {tas} KTAS?"),
        round_half_up(bank),
        1.0,
        "°",
    )
    .hint("Bank = (TAS ÷ 10) × 1.5, max 30° IFR")
    .explanation(format!("({tas} ÷ 10) × 1.5 = {}°{limited}", fixed(raw, 1)))
}

pub fn turn_radius(s: &mut dyn Sampler) -> ProblemDraft {
    let tas = s.pick(&[90, 100, 120, 150, 180, 200, 240]);
    let radius = f64::from(tas) / 200.0;

    ProblemDraft::new(
        format!("At {tas} KTAS in a standard rate turn, what is the turn radius?"),
        round_to(radius, 1),
        0.1,
        "NM",
    )
    .hint("Turn Radius = TAS ÷ 200")
    .explanation(format!("{tas} ÷ 200 = {} NM", fixed(radius, 1)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Solve {
    Time,
    Distance,
    Speed,
}

const GROUND_SPEEDS: [i32; 9] = [120, 150, 180, 210, 240, 300, 360, 420, 480];

pub fn time_speed_distance(s: &mut dyn Sampler) -> ProblemDraft {
    match s.pick(&[Solve::Time, Solve::Distance, Solve::Speed]) {
        Solve::Distance => {
            let gs = s.pick(&GROUND_SPEEDS);
            let minutes = s.pick(&[5, 6, 8, 10, 12, 15, 20, 25, 30]);
            let per_minute = f64::from(gs) / 60.0;
            let answer = round_half_up(per_minute * f64::from(minutes));
            ProblemDraft::new(
                format!("At {gs} knots ground speed, how far do you travel in {minutes} minutes?"),
                answer,
                2.0,
                "NM",
            )
            .hint("Distance = (GS ÷ 60) × Time in minutes")
            .explanation(format!(
                "{gs} kts = {} NM/min. {} × {minutes} min = {} NM",
                num(per_minute),
                num(per_minute),
                num(answer)
            ))
        }
        Solve::Time => {
            let gs = s.pick(&GROUND_SPEEDS);
            let distance = s.pick(&[20, 30, 40, 50, 60, 80, 100, 120]);
            let per_minute = f64::from(gs) / 60.0;
            let answer = round_half_up(f64::from(distance) / per_minute);
            ProblemDraft::new(
                format!("At {gs} knots, how long to travel {distance} NM?"),
                answer,
                1.0,
                "minutes",
            )
            .hint("Time = Distance ÷ (GS ÷ 60)")
            .explanation(format!(
                "{gs} kts = {} NM/min. {distance} NM ÷ {} = {} minutes",
                num(per_minute),
                num(per_minute),
                num(answer)
            ))
        }
        Solve::Speed => {
            let minutes = s.pick(&[10, 12, 15, 20, 24, 30, 40, 45]);
            let distance = s.pick(&[30, 40, 50, 60, 80, 100, 120, 150]);
            let per_minute = f64::from(distance) / f64::from(minutes);
            let answer = round_half_up(per_minute * 60.0);
            ProblemDraft::new(
                format!("You traveled {distance} NM in {minutes} minutes. What is your ground speed?"),
                answer,
                5.0,
                "knots",
            )
            .hint("GS = (Distance ÷ Time) × 60")
            .explanation(format!(
                "{distance} ÷ {minutes} = {} NM/min × 60 = {} knots",
                fixed(per_minute, 1),
                num(answer)
            ))
        }
    }
}

const GLIDE_RATIOS: [(i32, &str); 5] = [
    (9, "light single"),
    (10, "training aircraft"),
    (12, "light twin"),
    (15, "turboprop"),
    (17, "jet"),
];

pub fn glide_distance(s: &mut dyn Sampler) -> ProblemDraft {
    let altitude = s.pick(&[6000, 9000, 12_000, 15_000, 18_000, 21_000, 24_000, 30_000, 36_000]);
    let (ratio, aircraft) = s.pick(&GLIDE_RATIOS);

    let altitude_nm = f64::from(altitude) / FEET_PER_NM;
    let answer = round_half_up(altitude_nm * f64::from(ratio));

    ProblemDraft::new(
        format!(
            "Engine failure at {} ft. With a {ratio}:1 glide ratio ({aircraft}), how far can you glide?",
            thousands(altitude)
        ),
        answer,
        2.0,
        "NM",
    )
    .hint("Glide Distance = (Altitude ÷ 6,000) × Glide Ratio")
    .explanation(format!(
        "{} ft ÷ 6,000 = {} NM altitude. {} × {ratio} = {} NM",
        thousands(altitude),
        fixed(altitude_nm, 1),
        fixed(altitude_nm, 1),
        num(answer)
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlantMode {
    OverStation,
    SlantVsGround,
    MinAltitude,
}

pub fn slant_range(s: &mut dyn Sampler) -> ProblemDraft {
    match s.pick(&[
        SlantMode::OverStation,
        SlantMode::SlantVsGround,
        SlantMode::MinAltitude,
    ]) {
        SlantMode::OverStation => {
            let altitude =
                s.pick(&[6000, 9000, 12_000, 15_000, 18_000, 21_000, 24_000, 30_000, 36_000]);
            let dme = f64::from(altitude) / FEET_PER_NM;
            ProblemDraft::new(
                format!(
                    "Directly over a VOR at {} ft. What does the DME read?",
                    thousands(altitude)
                ),
                round_to(dme, 1),
                0.2,
                "DME",
            )
            .hint("DME over station = Altitude ÷ 6,000 (6,000 ft ≈ 1 NM)")
            .explanation(format!(
                "{} ft ÷ 6,000 = {} NM",
                thousands(altitude),
                fixed(dme, 1)
            ))
        }
        SlantMode::SlantVsGround => {
            let ground = s.pick(&[3, 4, 5, 6, 8]);
            let altitude = s.pick(&[12_000, 18_000, 24_000, 30_000]);
            let altitude_nm = f64::from(altitude) / FEET_PER_NM;
            let squared = f64::from(ground * ground) + altitude_nm * altitude_nm;
            let slant = squared.sqrt();
            ProblemDraft::new(
                format!(
                    "At {} ft, {ground} NM ground distance from VOR. What does DME show?",
                    thousands(altitude)
                ),
                round_to(slant, 1),
                0.3,
                "DME",
            )
            .hint("Slant² = Ground² + (Altitude÷6000)². Close + high = bigger difference.")
            .explanation(format!(
                "Alt in NM = {}. Slant = √({ground}² + {}²) = √{} = {} NM",
                fixed(altitude_nm, 1),
                fixed(altitude_nm, 1),
                fixed(squared, 1),
                fixed(slant, 1)
            ))
        }
        SlantMode::MinAltitude => {
            let dme = s.pick(&[2, 3, 4, 5, 6]);
            let altitude = dme * 6000;
            ProblemDraft::new(
                format!(
                    "What is the minimum altitude to show at least {dme} DME when directly over the station?"
                ),
                f64::from(altitude),
                100.0,
                "ft",
            )
            .hint("Altitude = DME × 6,000")
            .explanation(format!(
                "{dme} NM × 6,000 ft/NM = {} ft",
                thousands(altitude)
            ))
        }
    }
}
