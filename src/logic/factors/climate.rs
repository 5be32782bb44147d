use super::SuitabilityFactor;
use crate::logic::calculations::{percent, range_fit, OverageScale};
use crate::models::{CropProfile, Factor, FactorScore, FarmConditions};

/// Rainfall fit against the crop's annual precipitation band.
///
/// A missing rainfall measurement scores 0.1, not the 0.5 used for
/// temperature.
pub struct RainfallFactor;

pub const RAIN_MISSING_SCORE: f64 = 0.1;

impl SuitabilityFactor for RainfallFactor {
    fn factor(&self) -> Factor {
        Factor::Rainfall
    }

    fn evaluate(&self, crop: &CropProfile, conditions: &FarmConditions) -> FactorScore {
        let value = range_fit(
            crop.rain_range,
            conditions.annual_rain_mm,
            RAIN_MISSING_SCORE,
            OverageScale::Bound,
        );
        FactorScore::new(
            Factor::Rainfall,
            value,
            format!("Rainfall suitability: {}%", percent(value)),
        )
    }
}

/// Temperature fit against the crop's average temperature band.
pub struct TemperatureFactor;

pub const TEMP_MISSING_SCORE: f64 = 0.5;

impl SuitabilityFactor for TemperatureFactor {
    fn factor(&self) -> Factor {
        Factor::Temperature
    }

    fn evaluate(&self, crop: &CropProfile, conditions: &FarmConditions) -> FactorScore {
        let value = range_fit(
            crop.temp_range,
            conditions.avg_temp_c,
            TEMP_MISSING_SCORE,
            OverageScale::AbsBound,
        );
        FactorScore::new(
            Factor::Temperature,
            value,
            format!("Temperature suitability: {}%", percent(value)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Range, Season};

    fn crop(rain: Option<Range>, temp: Option<Range>) -> CropProfile {
        CropProfile {
            name: "Test".into(),
            compatible_soils: vec!["Loamy".into()],
            rain_range: rain,
            temp_range: temp,
            seasons: vec![Season::Kharif],
            requires_irrigation: false,
            base_yield_kg_per_ha: 1000.0,
            group: None,
        }
    }

    #[test]
    fn missing_rain_scores_low_confidence() {
        let c = crop(Some(Range::new(800.0, 4000.0)), None);
        let cond = FarmConditions::new("Loamy", Season::Kharif, 1.0).with_avg_temp(27.0);
        let score = RainfallFactor.evaluate(&c, &cond);
        assert_eq!(score.value, 0.1);
        assert_eq!(score.reason, "Rainfall suitability: 10%");
    }

    #[test]
    fn missing_temperature_scores_neutral() {
        let c = crop(None, Some(Range::new(20.0, 35.0)));
        let cond = FarmConditions::new("Loamy", Season::Kharif, 1.0).with_annual_rain(1000.0);
        let score = TemperatureFactor.evaluate(&c, &cond);
        assert_eq!(score.value, 0.5);
        assert_eq!(score.reason, "Temperature suitability: 50%");
    }

    #[test]
    fn flexible_crop_scores_half_even_with_data() {
        let c = crop(None, None);
        let cond = FarmConditions::new("Loamy", Season::Kharif, 1.0)
            .with_annual_rain(1000.0)
            .with_avg_temp(27.0);
        assert_eq!(RainfallFactor.evaluate(&c, &cond).value, 0.5);
        assert_eq!(TemperatureFactor.evaluate(&c, &cond).value, 0.5);
    }

    #[test]
    fn excess_rain_partial_credit() {
        // 5000mm vs 4000mm max: 1 - 1000/4000 = 0.75
        let c = crop(Some(Range::new(800.0, 4000.0)), None);
        let cond = FarmConditions::new("Loamy", Season::Kharif, 1.0).with_annual_rain(5000.0);
        let score = RainfallFactor.evaluate(&c, &cond);
        assert!((score.value - 0.75).abs() < 1e-12);
        assert_eq!(score.reason, "Rainfall suitability: 75%");
    }

    #[test]
    fn cold_partial_credit() {
        // 15C vs 20C min: 1 - 5/20 = 0.75
        let c = crop(None, Some(Range::new(20.0, 35.0)));
        let cond = FarmConditions::new("Loamy", Season::Kharif, 1.0).with_avg_temp(15.0);
        assert!((TemperatureFactor.evaluate(&c, &cond).value - 0.75).abs() < 1e-12);
    }
}
