use super::crop::Range;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PestProfile {
    pub crop: String,
    pub pest: String,
    pub season: String,
    pub temp_c: Range,
    pub humidity_pct: Range,
    pub soil: String,
    pub prevention: String,
}

/// Field conditions a pest forecast is made for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PestQuery {
    pub crop: String,
    pub season: String,
    pub soil: String,
    pub temp_c: f64,
    pub humidity_pct: f64,
}

impl PestProfile {
    pub fn matches(&self, query: &PestQuery) -> bool {
        self.crop.eq_ignore_ascii_case(query.crop.trim())
            && self.season.eq_ignore_ascii_case(query.season.trim())
            && self.soil.eq_ignore_ascii_case(query.soil.trim())
            && self.temp_c.contains(query.temp_c)
            && self.humidity_pct.contains(query.humidity_pct)
    }
}
