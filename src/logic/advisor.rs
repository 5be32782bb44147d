use super::costs;
use super::pests::predict_pests;
use super::scorer::ScoringEngine;
use crate::catalog::Catalog;
use crate::error::{FarmWiseError, Result};
use crate::models::{
    CostEstimate, FarmConditions, PestProfile, PestQuery, ScoreResult, DEFAULT_AVG_TEMP_C,
};
use rand::Rng;

/// One-shot recommendation for a farm: best crop, its pest outlook and
/// what it costs to grow.
#[derive(Debug, Clone)]
pub struct Advice<'a> {
    pub top: ScoreResult,
    pub alternatives: Vec<ScoreResult>,
    pub pests: Vec<&'a PestProfile>,
    /// False when the pest table has no rows for the crop at all.
    pub pest_data_available: bool,
    pub cost: Option<CostEstimate>,
}

pub struct Advisor<'a> {
    catalog: &'a Catalog,
    engine: ScoringEngine,
}

impl<'a> Advisor<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            engine: ScoringEngine::new(),
        }
    }

    pub fn advise<R: Rng + ?Sized>(
        &self,
        conditions: &FarmConditions,
        humidity_pct: f64,
        alternatives: usize,
        rng: &mut R,
    ) -> Result<Advice<'a>> {
        let mut ranked = self
            .engine
            .evaluate(self.catalog.crops.crops(), conditions)
            .into_iter();
        let top = ranked
            .next()
            .ok_or_else(|| FarmWiseError::NotFound("Crop catalog is empty".into()))?;
        let alternatives: Vec<ScoreResult> = ranked.take(alternatives).collect();

        let pest_data_available = self.catalog.pests.for_crop(&top.crop).next().is_some();
        let query = PestQuery {
            crop: top.crop.clone(),
            season: conditions.season.to_string(),
            soil: conditions.soil.clone(),
            temp_c: conditions.avg_temp_c.unwrap_or(DEFAULT_AVG_TEMP_C),
            humidity_pct,
        };
        let pests = predict_pests(&self.catalog.pests, &query);

        let cost = match costs::estimate(
            &self.catalog.costs,
            &top.crop,
            conditions.area_hectares,
            "hectare",
            rng,
        ) {
            Ok(estimate) => Some(estimate),
            Err(FarmWiseError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        tracing::info!(
            "Advised {} ({:.1}%), {} pest(s), cost data: {}",
            top.crop,
            top.score_pct(),
            pests.len(),
            cost.is_some()
        );

        Ok(Advice {
            top,
            alternatives,
            pests,
            pest_data_available,
            cost,
        })
    }
}
