use super::farm::Season;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AVG_TEMP_C: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimateSource {
    OpenMeteo,
    Default,
    Manual,
    /// Measurements came from more than one source.
    Mixed,
}

impl ClimateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateSource::OpenMeteo => "Open-Meteo",
            ClimateSource::Default => "Regional default",
            ClimateSource::Manual => "Manual",
            ClimateSource::Mixed => "Mixed",
        }
    }
}

impl std::fmt::Display for ClimateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Climate summary for a farm location. Every measurement may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateEstimate {
    pub avg_temp_c: Option<f64>,
    pub annual_rain_mm: Option<f64>,
    pub recent_precip_mm: Option<f64>,
    pub source: ClimateSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ClimateEstimate {
    /// What a failed lookup yields.
    pub fn absent() -> Self {
        Self {
            avg_temp_c: None,
            annual_rain_mm: None,
            recent_precip_mm: None,
            source: ClimateSource::Default,
            fetched_at: None,
        }
    }

    pub fn manual(avg_temp_c: Option<f64>, annual_rain_mm: Option<f64>) -> Self {
        Self {
            avg_temp_c,
            annual_rain_mm,
            recent_precip_mm: None,
            source: ClimateSource::Manual,
            fetched_at: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.avg_temp_c.is_none() && self.annual_rain_mm.is_none()
    }

    /// Overlay values that are present in `other` onto this estimate.
    /// The result is `Mixed` when values from both sides survive.
    pub fn merge(mut self, other: &ClimateEstimate) -> Self {
        let temp_over = other.avg_temp_c.is_some();
        let rain_over = other.annual_rain_mm.is_some();
        if !temp_over && !rain_over {
            return self;
        }

        let keeps_own = (self.avg_temp_c.is_some() && !temp_over)
            || (self.annual_rain_mm.is_some() && !rain_over);
        if temp_over {
            self.avg_temp_c = other.avg_temp_c;
        }
        if rain_over {
            self.annual_rain_mm = other.annual_rain_mm;
        }
        self.source = if keeps_own {
            ClimateSource::Mixed
        } else {
            other.source
        };
        self
    }

    /// Fill any absent measurement with the regional default for `season`.
    pub fn with_defaults(&self, season: &Season) -> Self {
        let mut resolved = self.clone();
        let fill_temp = resolved.avg_temp_c.is_none();
        let fill_rain = resolved.annual_rain_mm.is_none();
        if !fill_temp && !fill_rain {
            return resolved;
        }

        resolved.source = if self.is_empty() {
            ClimateSource::Default
        } else {
            ClimateSource::Mixed
        };
        if fill_temp {
            resolved.avg_temp_c = Some(DEFAULT_AVG_TEMP_C);
        }
        if fill_rain {
            resolved.annual_rain_mm = Some(default_annual_rain_mm(season));
        }
        resolved
    }
}

impl Default for ClimateEstimate {
    fn default() -> Self {
        Self::absent()
    }
}

/// Coarse annual rainfall by planting season.
pub fn default_annual_rain_mm(season: &Season) -> f64 {
    match season {
        Season::Kharif => 900.0,
        Season::Rabi => 500.0,
        Season::Zaid => 700.0,
        _ => 900.0,
    }
}
