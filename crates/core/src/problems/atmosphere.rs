use crate::model::ProblemDraft;
use crate::numeric::round_half_up;
use crate::random::Sampler;

use super::between;
use super::format::{fixed, num, thousands};

pub fn temp_conversion(s: &mut dyn Sampler) -> ProblemDraft {
    if s.chance() {
        let celsius = s.pick(&[-40, -30, -20, -10, 0, 5, 10, 15, 20, 25, 30, 35, 40]);
        let fahrenheit = f64::from(celsius) * 9.0 / 5.0 + 32.0;
        let answer = round_half_up(fahrenheit);
        let doubled = celsius * 2;

        ProblemDraft::new(
            format!("Convert {celsius}°C to Fahrenheit"),
            answer,
            2.0,
            "°F",
        )
        .hint("Double it, subtract 10%, add 32")
        .explanation(format!(
            "{celsius}°C × 2 = {doubled}, -10% = {}, +32 = {}°F",
            num(f64::from(doubled) * 0.9),
            num(answer)
        ))
    } else {
        let fahrenheit = s.pick(&[14, 32, 41, 50, 59, 68, 77, 86, 95, 104]);
        let celsius = f64::from(fahrenheit - 32) * 5.0 / 9.0;
        let answer = round_half_up(celsius);

        ProblemDraft::new(
            format!("Convert {fahrenheit}°F to Celsius"),
            answer,
            2.0,
            "°C",
        )
        .hint("Subtract 32, add 10%, divide by 2")
        .explanation(format!(
            "({fahrenheit}°F - 32) × 5/9 = {}°C",
            num(answer)
        ))
    }
}

/// ISA lapse of 2°C per thousand feet from 15°C at sea level.
pub fn isa_deviation(s: &mut dyn Sampler) -> ProblemDraft {
    let altitude = s.pick(&[5000, 8000, 10_000, 15_000, 18_000, 21_000, 25_000, 30_000, 35_000]);
    let thousands_ft = altitude / 1000;
    let isa = 15 - thousands_ft * 2;
    let actual = isa + between(s, -20, 20);
    let deviation = actual - isa;

    if s.chance() {
        ProblemDraft::new(
            format!(
                "What is the ISA temperature at {} feet MSL?",
                thousands(altitude)
            ),
            f64::from(isa),
            0.0,
            "°C",
        )
        .hint("ISA = 15°C - (altitude in 1000s × 2)")
        .explanation(format!(
            "ISA = 15 - ({thousands_ft} × 2) = 15 - {} = {isa}°C",
            thousands_ft * 2
        ))
    } else {
        let sign = if deviation > 0 { "+" } else { "" };
        ProblemDraft::new(
            format!(
                "At {} feet, OAT is {actual}°C. What is the ISA deviation?",
                thousands(altitude)
            ),
            f64::from(deviation),
            0.0,
            "°C",
        )
        .hint("First find ISA temp, then: Deviation = Actual - ISA")
        .explanation(format!(
            "ISA at {thousands_ft}K = {isa}°C. Deviation = {actual} - {isa} = {sign}{deviation}°C"
        ))
    }
}

pub fn pressure_altitude(s: &mut dyn Sampler) -> ProblemDraft {
    let setting = s.pick(&[
        29.42, 29.52, 29.62, 29.72, 29.82, 29.92, 30.02, 30.12, 30.22, 30.32, 30.42, 30.52,
    ]);
    let field = s.pick(&[0, 250, 500, 750, 1000, 1500, 2000, 3000, 4000, 5000]);

    let difference = 29.92 - setting;
    let correction = difference * 1000.0;
    let answer = round_half_up(f64::from(field) + correction);

    ProblemDraft::new(
        format!(
            "Field elevation is {} ft, altimeter setting is {}\" Hg. What is the pressure altitude?",
            thousands(field),
            fixed(setting, 2)
        ),
        answer,
        20.0,
        "feet",
    )
    .hint("10 feet per 0.01\" from 29.92")
    .explanation(format!(
        "Difference from 29.92: {}\" = {} ft. PA = {field} + {} = {} ft",
        fixed(difference, 2),
        num(round_half_up(correction)),
        num(round_half_up(correction)),
        num(answer)
    ))
}

pub fn true_airspeed(s: &mut dyn Sampler) -> ProblemDraft {
    let ias = s.pick(&[100, 120, 140, 160, 180, 200, 250, 280]);
    let altitude = s.pick(&[5000, 8000, 10_000, 12_000, 15_000, 18_000, 20_000, 25_000]);

    let correction = f64::from(ias) * (f64::from(altitude) / 1000.0) * 0.02;
    let answer = round_half_up(f64::from(ias) + correction);

    ProblemDraft::new(
        format!(
            "At {} ft MSL, IAS is {ias} knots. What is your TAS?",
            thousands(altitude)
        ),
        answer,
        3.0,
        "knots",
    )
    .hint("TAS = IAS + (IAS × altitude in 1000s × 2%)")
    .explanation(format!(
        "Correction = {ias} × {} × 0.02 = {} kts. TAS = {ias} + {} = {} kts",
        altitude / 1000,
        num(round_half_up(correction)),
        num(round_half_up(correction)),
        num(answer)
    ))
}

/// Convective cloud base from the temperature/dew point spread.
pub fn cloud_base(s: &mut dyn Sampler) -> ProblemDraft {
    let temp = s.pick(&[15, 18, 20, 22, 25, 28, 30, 32, 35]);
    let spread = s.pick(&[2, 3, 4, 5, 6, 7, 8, 10, 12, 15]);
    let dewpoint = temp - spread;
    let base = spread * 400;
    let explanation = format!(
        "Spread = {temp} - {dewpoint} = {spread}°C. Cloud base = {spread} × 400 = {} ft AGL",
        thousands(base)
    );

    let draft = if s.chance() {
        ProblemDraft::new(
            format!("METAR shows {temp}/{dewpoint:02}. Estimate cumulus cloud bases."),
            f64::from(base),
            200.0,
            "feet",
        )
        .hint("Cloud Base = (Temp - Dewpoint) × 400 ft")
    } else {
        ProblemDraft::new(
            format!("Temperature {temp}°C, dew point {dewpoint}°C. Estimate the cloud base AGL."),
            f64::from(base),
            200.0,
            "feet",
        )
        .hint("Cloud Base = Dew Point Spread × 400 ft")
    };
    draft.explanation(explanation)
}
