use crate::config::WeatherConfig;
use crate::error::{FarmWiseError, Result};
use crate::models::{round_to, ClimateEstimate, ClimateSource};
use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

// Open-Meteo forecast response, daily block only. Any entry may be null.
#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    daily: Option<OmDaily>,
}

#[derive(Debug, Default, Deserialize)]
struct OmDaily {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("FarmWise/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&daily={}&timezone=auto&past_days={}",
            self.config.base_url.trim_end_matches('/'),
            latitude,
            longitude,
            DAILY_FIELDS,
            self.config.past_days
        )
    }

    /// Fetch recent daily weather and turn it into a climate estimate.
    pub async fn fetch_climate(&self, latitude: f64, longitude: f64) -> Result<ClimateEstimate> {
        validate_coordinates(latitude, longitude)?;
        let url = self.forecast_url(latitude, longitude);
        tracing::debug!("Fetching Open-Meteo forecast: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FarmWiseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmWiseError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmForecastResponse = response.json().await.map_err(|e| {
            FarmWiseError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        let estimate = summarize(&om_response.daily.unwrap_or_default());
        tracing::info!(
            "Open-Meteo climate: avg {:?}C, est. annual rain {:?}mm",
            estimate.avg_temp_c,
            estimate.annual_rain_mm
        );
        Ok(estimate)
    }

    /// Test connection to the Open-Meteo API
    pub async fn test_connection(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let response = self
            .client
            .get(self.forecast_url(latitude, longitude))
            .send()
            .await
            .map_err(|e| FarmWiseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(FarmWiseError::InvalidData(format!(
            "Coordinates out of range: {}, {}",
            latitude, longitude
        )));
    }
    Ok(())
}

/// Average temperature from daily (max + min) / 2, and an annual rainfall
/// figure scaled up from the mean daily precipitation.
fn summarize(daily: &OmDaily) -> ClimateEstimate {
    let temps: Vec<f64> = daily
        .temperature_2m_max
        .iter()
        .zip(daily.temperature_2m_min.iter())
        .filter_map(|(max, min)| match (max, min) {
            (Some(a), Some(b)) => Some((a + b) / 2.0),
            _ => None,
        })
        .collect();

    let avg_temp_c = if temps.is_empty() {
        None
    } else {
        Some(round_to(temps.iter().sum::<f64>() / temps.len() as f64, 1))
    };

    let precip: Vec<f64> = daily.precipitation_sum.iter().flatten().copied().collect();
    let (recent_precip_mm, annual_rain_mm) = if precip.is_empty() {
        (None, None)
    } else {
        let recent: f64 = precip.iter().sum();
        let days = precip.len().max(1) as f64;
        (Some(recent), Some(round_to(recent / days * 365.0, 1)))
    };

    ClimateEstimate {
        avg_temp_c,
        annual_rain_mm,
        recent_precip_mm,
        source: ClimateSource::OpenMeteo,
        fetched_at: Some(Utc::now()),
    }
}
