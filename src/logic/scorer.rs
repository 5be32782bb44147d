use super::calculations::clamp01;
use super::factors::{
    IrrigationFactor, RainfallFactor, SeasonFactor, SoilFactor, SuitabilityFactor,
    TemperatureFactor,
};
use crate::models::{CropProfile, Factor, FarmConditions, ScoreResult};

pub struct ScoringEngine {
    factors: Vec<Box<dyn SuitabilityFactor>>,
}

impl ScoringEngine {
    /// Engine with the five standard factors, in reporting order.
    pub fn new() -> Self {
        let factors: Vec<Box<dyn SuitabilityFactor>> = vec![
            Box::new(SoilFactor),
            Box::new(SeasonFactor),
            Box::new(RainfallFactor),
            Box::new(TemperatureFactor),
            Box::new(IrrigationFactor),
        ];

        Self { factors }
    }

    pub fn score_crop(&self, crop: &CropProfile, conditions: &FarmConditions) -> ScoreResult {
        let factors: Vec<_> = self
            .factors
            .iter()
            .map(|f| f.evaluate(crop, conditions))
            .collect();

        let score = clamp01(factors.iter().map(|f| f.weighted()).sum());
        let est_yield_per_ha = crop.base_yield_kg_per_ha * score;

        ScoreResult {
            crop: crop.name.clone(),
            score,
            reasons: factors.iter().map(|f| f.reason.clone()).collect(),
            factors,
            base_yield_kg_per_ha: crop.base_yield_kg_per_ha,
            est_yield_per_ha,
            area_hectares: conditions.area_hectares,
            total_est_yield: est_yield_per_ha * conditions.area_hectares,
        }
    }

    /// Score every crop and rank by score, highest first. Equal scores keep
    /// catalog order.
    pub fn evaluate(&self, crops: &[CropProfile], conditions: &FarmConditions) -> Vec<ScoreResult> {
        let mut results: Vec<ScoreResult> = crops
            .iter()
            .map(|crop| self.score_crop(crop, conditions))
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            "Scored {} crops for {} soil, {} season",
            results.len(),
            conditions.soil,
            conditions.season
        );

        results
    }

    pub fn list_factors(&self) -> Vec<(Factor, f64)> {
        self.factors
            .iter()
            .map(|f| (f.factor(), f.factor().weight()))
            .collect()
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

pub fn evaluate(crops: &[CropProfile], conditions: &FarmConditions) -> Vec<ScoreResult> {
    ScoringEngine::new().evaluate(crops, conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CropCatalog;
    use crate::models::{Range, Season};

    fn catalog() -> CropCatalog {
        CropCatalog::embedded().unwrap()
    }

    fn ideal_kharif() -> FarmConditions {
        FarmConditions::new("Loamy", Season::Kharif, 1.0)
            .with_irrigation(true)
            .with_annual_rain(1800.0)
            .with_avg_temp(27.0)
    }

    fn result_for<'a>(results: &'a [ScoreResult], crop: &str) -> &'a ScoreResult {
        results.iter().find(|r| r.crop == crop).unwrap()
    }

    #[test]
    fn rice_ideal_conditions_score_full() {
        let catalog = catalog();
        let results = evaluate(catalog.crops(), &ideal_kharif());
        let rice = result_for(&results, "Rice");

        assert!((rice.score - 1.0).abs() < 1e-9);
        assert!((rice.est_yield_per_ha - 4500.0).abs() < 1e-6);
        assert!((rice.total_est_yield - 4500.0).abs() < 1e-6);
        assert_eq!(
            rice.reasons,
            vec![
                "Soil suitable",
                "Season suitable",
                "Rainfall suitability: 100%",
                "Temperature suitability: 100%",
                "Irrigation OK",
            ]
        );
    }

    #[test]
    fn sugarcane_without_irrigation_loses_exactly_irrigation_weight() {
        let catalog = catalog();
        let sugarcane = catalog.get("Sugarcane").unwrap();
        let engine = ScoringEngine::new();

        let irrigated = engine.score_crop(sugarcane, &ideal_kharif());
        let dry = engine.score_crop(sugarcane, &ideal_kharif().with_irrigation(false));

        assert!((irrigated.score - dry.score - 0.15).abs() < 1e-9);
        assert_eq!(dry.factor(Factor::Irrigation).unwrap().value, 0.0);
        assert_eq!(
            dry.reasons.last().map(String::as_str),
            Some("Irrigation needed but not available")
        );
    }

    #[test]
    fn missing_rain_factor_is_exactly_point_one() {
        let catalog = catalog();
        let conditions = FarmConditions::new("Sandy", Season::Rabi, 2.0).with_avg_temp(40.0);
        for result in evaluate(catalog.crops(), &conditions) {
            assert_eq!(result.factor(Factor::Rainfall).unwrap().value, 0.1);
        }
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let catalog = catalog();
        let scenarios = [
            ideal_kharif(),
            FarmConditions::new("Peaty", Season::Zaid, 0.01),
            FarmConditions::new("Black", Season::Rabi, 5.0)
                .with_annual_rain(20_000.0)
                .with_avg_temp(-30.0),
            FarmConditions::new("Nowhere", Season::Other("Dry".into()), 1.0)
                .with_annual_rain(0.0)
                .with_avg_temp(60.0),
        ];
        for conditions in &scenarios {
            for result in evaluate(catalog.crops(), conditions) {
                assert!((0.0..=1.0).contains(&result.score), "{:?}", result);
            }
        }
    }

    #[test]
    fn soil_mismatch_caps_score() {
        let catalog = catalog();
        // Sandy is not a Rice soil; everything else is ideal.
        let conditions = FarmConditions::new("Sandy", Season::Kharif, 1.0)
            .with_irrigation(true)
            .with_annual_rain(1800.0)
            .with_avg_temp(27.0);
        let results = evaluate(catalog.crops(), &conditions);
        for result in &results {
            let crop = catalog.get(&result.crop).unwrap();
            if !crop.suits_soil("Sandy") {
                assert!(result.score <= 0.70 + 1e-9, "{}", result.crop);
            }
        }
        assert!((result_for(&results, "Rice").score - 0.70).abs() < 1e-9);
    }

    #[test]
    fn unmet_irrigation_caps_score() {
        let catalog = catalog();
        let conditions = ideal_kharif().with_irrigation(false);
        for result in evaluate(catalog.crops(), &conditions) {
            if catalog.get(&result.crop).unwrap().requires_irrigation {
                assert!(result.score <= 0.85 + 1e-9, "{}", result.crop);
            }
        }
    }

    #[test]
    fn results_sorted_descending() {
        let catalog = catalog();
        let results = evaluate(catalog.crops(), &ideal_kharif());
        assert_eq!(results.len(), catalog.len());
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ties_keep_catalog_order() {
        let make = |name: &str| CropProfile {
            name: name.into(),
            compatible_soils: vec!["Red".into()],
            rain_range: None,
            temp_range: None,
            seasons: vec![Season::Rabi],
            requires_irrigation: false,
            base_yield_kg_per_ha: 100.0,
            group: None,
        };
        let mut best = make("Best");
        best.compatible_soils = vec!["Loamy".into()];
        let crops = vec![make("A"), make("B"), best, make("C"), make("D")];

        let conditions = FarmConditions::new("Loamy", Season::Rabi, 1.0);
        let order: Vec<String> = evaluate(&crops, &conditions)
            .into_iter()
            .map(|r| r.crop)
            .collect();
        assert_eq!(order, vec!["Best", "A", "B", "C", "D"]);
    }

    #[test]
    fn yield_scales_with_area_and_score() {
        let crop = CropProfile {
            name: "Wheat".into(),
            compatible_soils: vec!["Loamy".into()],
            rain_range: Some(Range::new(300.0, 900.0)),
            temp_range: Some(Range::new(10.0, 25.0)),
            seasons: vec![Season::Rabi],
            requires_irrigation: false,
            base_yield_kg_per_ha: 3000.0,
            group: None,
        };
        // Season misses (Kharif), all else ideal: 0.30 + 0.20 + 0.15 + 0.15 = 0.80
        let conditions = FarmConditions::new("Loamy", Season::Kharif, 2.5)
            .with_annual_rain(500.0)
            .with_avg_temp(20.0);
        let result = ScoringEngine::new().score_crop(&crop, &conditions);
        assert!((result.score - 0.80).abs() < 1e-9);
        assert!((result.est_yield_per_ha - 2400.0).abs() < 1e-6);
        assert!((result.total_est_yield - 6000.0).abs() < 1e-6);
        assert_eq!(result.area_hectares, 2.5);
    }

    #[test]
    fn unknown_soil_scores_zero_soil_factor_everywhere() {
        let catalog = catalog();
        let conditions = FarmConditions::new("Volcanic", Season::Kharif, 1.0);
        for result in evaluate(catalog.crops(), &conditions) {
            assert_eq!(result.factor(Factor::Soil).unwrap().value, 0.0);
        }
    }

    #[test]
    fn factor_list_in_reporting_order() {
        let factors: Vec<Factor> = ScoringEngine::new()
            .list_factors()
            .into_iter()
            .map(|(f, _)| f)
            .collect();
        assert_eq!(factors, Factor::all());
    }
}
