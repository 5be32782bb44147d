use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Soil,
    Season,
    Rainfall,
    Temperature,
    Irrigation,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Soil => "Soil",
            Factor::Season => "Season",
            Factor::Rainfall => "Rainfall",
            Factor::Temperature => "Temperature",
            Factor::Irrigation => "Irrigation",
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Factor::Soil => 0.30,
            Factor::Season => 0.20,
            Factor::Rainfall => 0.20,
            Factor::Temperature => 0.15,
            Factor::Irrigation => 0.15,
        }
    }

    /// Factors in the order results report them.
    pub fn all() -> &'static [Factor] {
        &[
            Factor::Soil,
            Factor::Season,
            Factor::Rainfall,
            Factor::Temperature,
            Factor::Irrigation,
        ]
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorScore {
    pub factor: Factor,
    /// Sub-score in [0, 1].
    pub value: f64,
    pub weight: f64,
    pub reason: String,
}

impl FactorScore {
    pub fn new(factor: Factor, value: f64, reason: impl Into<String>) -> Self {
        Self {
            factor,
            value,
            weight: factor.weight(),
            reason: reason.into(),
        }
    }

    pub fn weighted(&self) -> f64 {
        self.value * self.weight
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub crop: String,
    pub score: f64,
    pub reasons: Vec<String>,
    pub factors: Vec<FactorScore>,
    pub base_yield_kg_per_ha: f64,
    pub est_yield_per_ha: f64,
    pub area_hectares: f64,
    pub total_est_yield: f64,
}

impl ScoreResult {
    pub fn score_pct(&self) -> f64 {
        round_to(self.score * 100.0, 1)
    }

    pub fn factor(&self, factor: Factor) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.factor == factor)
    }
}

/// Flat, display-rounded row of an exported result set. Field order is the
/// stable contract for downstream consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub rank: usize,
    pub crop: String,
    pub score_pct: f64,
    pub est_yield_kg_per_ha: f64,
    pub total_est_yield_kg: f64,
    pub area_hectare: f64,
    pub reasons: Vec<String>,
}

impl ExportRecord {
    pub fn from_result(rank: usize, result: &ScoreResult) -> Self {
        Self {
            rank,
            crop: result.crop.clone(),
            score_pct: result.score_pct(),
            est_yield_kg_per_ha: round_to(result.est_yield_per_ha, 1),
            total_est_yield_kg: round_to(result.total_est_yield, 1),
            area_hectare: round_to(result.area_hectares, 4),
            reasons: result.reasons.clone(),
        }
    }
}

/// Round to `decimals` places, halves to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
