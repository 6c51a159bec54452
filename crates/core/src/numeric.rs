//! Rounding shared by generators and statistics.

/// Round half toward positive infinity (`-2.5` becomes `-2`, `2.5` becomes `3`).
///
/// `f64::round` rounds half away from zero, which disagrees for negative
/// halves such as an ISA deviation of `-7.5`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimal places using [`round_half_up`].
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    round_half_up(value * factor) / factor
}

/// Whole-number percentage of `part` in `whole`; `0` when `whole` is zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    round_half_up(part as f64 / whole as f64 * 100.0) as u32
}

/// Rounded mean of a total over a count; `0` when `count` is zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn rounded_mean(total: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    round_half_up(total as f64 / count as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(9.99), 10.0);
    }

    #[test]
    fn rounds_to_places() {
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(2.346, 2), 2.35);
        assert_eq!(round_to(0.9, 1), 0.9);
    }

    #[test]
    fn percent_handles_zero_denominator() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
    }

    #[test]
    fn mean_handles_zero_count() {
        assert_eq!(rounded_mean(0, 0), 0);
        assert_eq!(rounded_mean(25, 2), 13);
    }
}
