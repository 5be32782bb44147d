use crate::models::Range;

pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// How the distance outside a tolerance band is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverageScale {
    /// Divide by `max(1, bound)`. Used for quantities that are never negative.
    Bound,
    /// Divide by `max(1, |bound|)`. Needed for temperatures below zero.
    AbsBound,
}

/// Score how well a measurement sits in a tolerance band.
///
/// - no band: 0.5 (crop is flexible)
/// - band but no measurement: `missing_default`
/// - inside the band (inclusive): 1.0
/// - outside: `max(0, 1 - distance / scale(nearest bound))`
pub fn range_fit(
    range: Option<Range>,
    measured: Option<f64>,
    missing_default: f64,
    scale: OverageScale,
) -> f64 {
    let range = match range {
        Some(r) => r,
        None => return 0.5,
    };
    let value = match measured {
        Some(v) => v,
        None => return missing_default,
    };

    if range.contains(value) {
        return 1.0;
    }

    let (distance, bound) = if value < range.min {
        (range.min - value, range.min)
    } else {
        (value - range.max, range.max)
    };
    let denominator = match scale {
        OverageScale::Bound => bound.max(1.0),
        OverageScale::AbsBound => bound.abs().max(1.0),
    };

    (1.0 - distance / denominator).max(0.0)
}

/// Whole-percent rendering of a sub-score, rounding halves to even.
pub fn percent(value: f64) -> i64 {
    (value * 100.0).round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(min: f64, max: f64) -> Option<Range> {
        Some(Range::new(min, max))
    }

    #[test]
    fn missing_band_is_neutral() {
        assert_eq!(range_fit(None, Some(100.0), 0.1, OverageScale::Bound), 0.5);
        assert_eq!(range_fit(None, None, 0.1, OverageScale::Bound), 0.5);
    }

    #[test]
    fn missing_measurement_uses_default() {
        assert_eq!(
            range_fit(band(800.0, 4000.0), None, 0.1, OverageScale::Bound),
            0.1
        );
        assert_eq!(
            range_fit(band(20.0, 35.0), None, 0.5, OverageScale::AbsBound),
            0.5
        );
    }

    #[test]
    fn inside_band_is_full_score() {
        assert_eq!(
            range_fit(band(800.0, 4000.0), Some(800.0), 0.1, OverageScale::Bound),
            1.0
        );
        assert_eq!(
            range_fit(band(800.0, 4000.0), Some(4000.0), 0.1, OverageScale::Bound),
            1.0
        );
    }

    #[test]
    fn below_band_partial_credit() {
        // 600mm against an 800mm minimum: 1 - 200/800 = 0.75
        let fit = range_fit(band(800.0, 4000.0), Some(600.0), 0.1, OverageScale::Bound);
        assert!((fit - 0.75).abs() < 1e-12);
    }

    #[test]
    fn above_band_partial_credit() {
        // 40C against a 35C maximum: 1 - 5/35
        let fit = range_fit(band(20.0, 35.0), Some(40.0), 0.5, OverageScale::AbsBound);
        assert!((fit - (1.0 - 5.0 / 35.0)).abs() < 1e-12);
    }

    #[test]
    fn far_outside_band_floors_at_zero() {
        assert_eq!(
            range_fit(band(1000.0, 4000.0), Some(9000.0), 0.1, OverageScale::Bound),
            0.0
        );
    }

    #[test]
    fn small_bounds_normalize_by_one() {
        // Bound 0.5 is lifted to 1: 1 - 0.25/1
        let fit = range_fit(band(0.5, 2.0), Some(0.25), 0.1, OverageScale::Bound);
        assert!((fit - 0.75).abs() < 1e-12);
    }

    #[test]
    fn negative_temperature_bound_uses_magnitude() {
        // -8C against a -5C minimum: 1 - 3/5
        let fit = range_fit(band(-5.0, 10.0), Some(-8.0), 0.5, OverageScale::AbsBound);
        assert!((fit - 0.4).abs() < 1e-12);
    }

    #[test]
    fn percent_rounds_half_to_even() {
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(0.125), 12);
        assert_eq!(percent(0.1), 10);
    }

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(1.2), 1.0);
        assert_eq!(clamp01(-0.3), 0.0);
        assert_eq!(clamp01(0.42), 0.42);
    }
}
