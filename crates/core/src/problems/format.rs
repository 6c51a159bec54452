//! Text helpers shared by the generators.

use crate::numeric::round_to;

/// Display a computed value with at most two decimals and no trailing zeros.
pub(crate) fn num(value: f64) -> String {
    let text = format!("{:.2}", round_to(value, 2));
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Fixed number of decimals, e.g. `fixed(2.5, 2) == "2.50"`.
pub(crate) fn fixed(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

/// Thousands separators, e.g. `25,000`.
pub(crate) fn thousands(value: i32) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Wrap a heading into `1..=360`; north is `360`, never `0`.
pub(crate) fn normalize_heading(heading: i32) -> i32 {
    match heading.rem_euclid(360) {
        0 => 360,
        h => h,
    }
}

/// `m:ss` for a duration in seconds.
pub(crate) fn clock(seconds: i32) -> String {
    format!("{}:{:02}", seconds.div_euclid(60), seconds.rem_euclid(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_trims_trailing_zeros() {
        assert_eq!(num(250.0), "250");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(-7.0), "-7");
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(750), "750");
        assert_eq!(thousands(5000), "5,000");
        assert_eq!(thousands(25_000), "25,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
        assert_eq!(thousands(-3000), "-3,000");
    }

    #[test]
    fn headings_wrap_to_one_through_three_sixty() {
        assert_eq!(normalize_heading(360), 360);
        assert_eq!(normalize_heading(0), 360);
        assert_eq!(normalize_heading(390), 30);
        assert_eq!(normalize_heading(-30), 330);
        assert_eq!(normalize_heading(-180), 180);
        assert_eq!(normalize_heading(720), 360);
    }

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(clock(135), "2:15");
        assert_eq!(clock(120), "2:00");
        assert_eq!(clock(95), "1:35");
    }
}
