use super::farm::Season;
use serde::{Deserialize, Serialize};

/// Inclusive tolerance band, written as `[min, max]` in catalog files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl From<(f64, f64)> for Range {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<Range> for (f64, f64) {
    fn from(r: Range) -> Self {
        (r.min, r.max)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    #[serde(rename = "soils")]
    pub compatible_soils: Vec<String>,
    /// Annual precipitation tolerance in mm. `None` means flexible.
    #[serde(default, rename = "rain_mm")]
    pub rain_range: Option<Range>,
    #[serde(default, rename = "temp_c")]
    pub temp_range: Option<Range>,
    pub seasons: Vec<Season>,
    #[serde(default, rename = "irrigation")]
    pub requires_irrigation: bool,
    pub base_yield_kg_per_ha: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl CropProfile {
    pub fn suits_soil(&self, soil: &str) -> bool {
        self.compatible_soils.iter().any(|s| s == soil)
    }

    pub fn is_perennial(&self) -> bool {
        self.seasons.contains(&Season::Perennial)
    }

    pub fn grows_in(&self, season: &Season) -> bool {
        self.is_perennial() || self.seasons.contains(season)
    }
}
