use crate::model::ProblemDraft;
use crate::numeric::{round_half_up, round_to};
use crate::random::Sampler;

use super::format::{fixed, num, thousands};

pub fn fuel_dumping(s: &mut dyn Sampler) -> ProblemDraft {
    let rate = s.pick(&[1200, 1500, 2000, 2200, 2500, 3000]);

    if s.chance() {
        let minutes = s.pick(&[5, 6, 7, 8, 10, 12, 15]);
        let fuel = rate * minutes;
        ProblemDraft::new(
            format!(
                "Dump rate is {} lbs/min. How much fuel dumped in {minutes} minutes?",
                thousands(rate)
            ),
            f64::from(fuel),
            100.0,
            "lbs",
        )
        .hint("Fuel = Rate × Time")
        .explanation(format!(
            "{} lbs/min × {minutes} min = {} lbs",
            thousands(rate),
            thousands(fuel)
        ))
    } else {
        let minutes = s.pick(&[3, 4, 5, 6, 7, 8, 9, 10, 12, 15, 18, 20]);
        let fuel = rate * minutes;
        ProblemDraft::new(
            format!(
                "Dump rate is {} lbs/min. How long to dump {} lbs?",
                thousands(rate),
                thousands(fuel)
            ),
            f64::from(minutes),
            0.5,
            "minutes",
        )
        .hint("Time = Fuel ÷ Rate")
        .explanation(format!(
            "{} lbs ÷ {} lbs/min = {minutes} minutes",
            thousands(fuel),
            thousands(rate)
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnduranceMode {
    FuelRequired,
    Endurance,
    EnoughFuel,
    IfrReserve,
}

const DAY_RESERVE_HOURS: f64 = 0.5;
const NIGHT_RESERVE_HOURS: f64 = 0.75;
const IFR_RESERVE_HOURS: f64 = 0.75;

pub fn fuel_endurance(s: &mut dyn Sampler) -> ProblemDraft {
    match s.pick(&[
        EnduranceMode::FuelRequired,
        EnduranceMode::Endurance,
        EnduranceMode::EnoughFuel,
        EnduranceMode::IfrReserve,
    ]) {
        EnduranceMode::FuelRequired => fuel_required(s),
        EnduranceMode::Endurance => endurance(s),
        EnduranceMode::EnoughFuel => enough_fuel(s),
        EnduranceMode::IfrReserve => ifr_reserve(s),
    }
}

fn flight_hours(hours: i32, minutes: i32) -> f64 {
    f64::from(hours) + f64::from(minutes) / 60.0
}

fn fuel_required(s: &mut dyn Sampler) -> ProblemDraft {
    let hours = s.pick(&[1, 2, 3, 4]);
    let minutes = s.pick(&[0, 15, 20, 30, 40, 45]);
    let flow = s.pick(&[8, 10, 12, 14, 15, 18, 20]);
    // Night flights are the minority of VFR trips.
    let night = s.unit() > 0.7;

    let (label, reserve, reserve_minutes) = if night {
        ("night", NIGHT_RESERVE_HOURS, 45)
    } else {
        ("day", DAY_RESERVE_HOURS, 30)
    };
    let flight = flight_hours(hours, minutes);
    let total = flight + reserve;
    let required = total * f64::from(flow);

    ProblemDraft::new(
        format!(
            "VFR {label} flight of {hours}:{minutes:02}, fuel burn {flow} gph. How many gallons needed?"
        ),
        round_to(required, 1),
        1.0,
        "gallons",
    )
    .hint(format!("VFR {label} reserve: {reserve_minutes} minutes"))
    .explanation(format!(
        "Flight: {} hrs + {} hr reserve = {} hrs × {flow} gph = {} gal",
        fixed(flight, 2),
        num(reserve),
        fixed(total, 2),
        fixed(required, 1)
    ))
}

#[allow(clippy::cast_possible_truncation)]
fn endurance(s: &mut dyn Sampler) -> ProblemDraft {
    let on_board = s.pick(&[30, 40, 50, 60, 75, 80, 100, 120]);
    let flow = s.pick(&[8, 10, 12, 14, 15, 18]);

    let endurance = f64::from(on_board) / f64::from(flow);
    let whole = endurance.floor();
    let minutes = round_half_up((endurance - whole) * 60.0) as i32;

    ProblemDraft::new(
        format!("You have {on_board} gallons on board, burning {flow} gph. What is your endurance?"),
        round_to(endurance, 2),
        0.1,
        "hours",
    )
    .hint("Endurance = Fuel on board ÷ Fuel flow")
    .explanation(format!(
        "{on_board} gal ÷ {flow} gph = {} hrs ({}:{minutes:02})",
        fixed(endurance, 2),
        num(whole)
    ))
}

/// Fuel left over after a VFR day trip and its reserve; negative when short.
fn enough_fuel(s: &mut dyn Sampler) -> ProblemDraft {
    let on_board = s.pick(&[35, 40, 45, 50, 55, 60]);
    let hours = s.pick(&[2, 3, 4]);
    let minutes = s.pick(&[0, 15, 30, 45]);
    let flow = s.pick(&[10, 12, 14]);

    let flight = flight_hours(hours, minutes);
    let required = (flight + DAY_RESERVE_HOURS) * f64::from(flow);
    let extra = f64::from(on_board) - required;

    ProblemDraft::new(
        format!(
            "VFR day, {on_board} gal on board, {hours}:{minutes:02} flight, {flow} gph burn. Extra fuel after reserve?"
        ),
        round_to(extra, 1),
        1.0,
        "gallons",
    )
    .hint("Calculate fuel required (flight + 30 min reserve), then subtract from fuel on board")
    .explanation(format!(
        "Need: ({} + 0.5) × {flow} = {} gal. Have {on_board}. Extra: {} gal",
        fixed(flight, 2),
        fixed(required, 1),
        fixed(extra, 1)
    ))
}

fn ifr_reserve(s: &mut dyn Sampler) -> ProblemDraft {
    let hours = s.pick(&[2, 3, 4, 5]);
    let minutes = s.pick(&[0, 10, 20, 30]);
    let alternate_minutes = s.pick(&[15, 20, 25, 30, 35, 40]);
    let flow = s.pick(&[600, 700, 800, 900, 1000, 1200]);

    let flight = flight_hours(hours, minutes);
    let alternate = f64::from(alternate_minutes) / 60.0;
    let required = (flight + alternate + IFR_RESERVE_HOURS) * f64::from(flow);
    let answer = round_half_up(required);

    ProblemDraft::new(
        format!(
            "IFR flight {hours}:{minutes:02}, alternate 0:{alternate_minutes:02}, fuel flow {flow} pph. Pounds of fuel needed?"
        ),
        answer,
        50.0,
        "lbs",
    )
    .hint("IFR = Flight + Alternate + 45 min reserve")
    .explanation(format!(
        "({} + {} + 0.75) × {flow} = {} lbs",
        fixed(flight, 2),
        fixed(alternate, 2),
        num(answer)
    ))
}
