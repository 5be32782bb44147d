use crate::error::{FarmWiseError, Result};
use dialoguer::{Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub farm: FarmConfig,
    pub weather: WeatherConfig,
    pub output: OutputConfig,
    pub catalog: CatalogConfig,
}

/// Defaults for farm inputs not given on the command line.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FarmConfig {
    pub soil: String,
    pub season: String,
    pub area_unit: String,
    pub has_irrigation: bool,
    /// Relative humidity used for pest forecasts when none is measured.
    pub humidity_pct: f64,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            soil: "Loamy".into(),
            season: "Kharif".into(),
            area_unit: "hectare".into(),
            has_irrigation: false,
            humidity_pct: 70.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub enabled: bool,
    pub base_url: String,
    pub past_days: u32,
    pub timeout_secs: u64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl WeatherConfig {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.open-meteo.com".into(),
            past_days: 3,
            timeout_secs: 8,
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub top_n: usize,
    pub export_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            top_n: 15,
            export_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Replaces the built-in crop table when set.
    pub crops_path: Option<PathBuf>,
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FarmWiseError::Config(format!(
                "Config file not found at {:?}. Run `farmwise init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FarmWiseError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Load the config if one exists in a standard location, otherwise fall
    /// back to defaults. An explicit path must exist.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if config_override.is_some() || Self::exists(None) {
            Self::load(config_override)
        } else {
            tracing::info!("No config file found, using built-in defaults");
            Ok(Self::default())
        }
    }

    fn parse(config_str: &str) -> Result<Self> {
        // Substitute environment variables
        let config_str = Self::substitute_env_vars(config_str);

        serde_yaml::from_str(&config_str)
            .map_err(|e| FarmWiseError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("farmwise").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/farmwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FarmWiseError::Config("Cannot determine config directory".into()))?
            .join("farmwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up FarmWise!");
        println!();

        // --- Farm ---
        println!("Farm");
        let soils = crate::models::known_soils();
        let soil_idx = Select::new()
            .with_prompt("  Soil type (choose nearest)")
            .items(&soils)
            .default(1)
            .interact()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let seasons = ["Kharif", "Rabi", "Zaid", "Perennial"];
        let season_idx = Select::new()
            .with_prompt("  Usual planting season")
            .items(&seasons)
            .default(0)
            .interact()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let units: Vec<&str> = crate::models::AreaUnit::all()
            .iter()
            .map(|u| u.as_str())
            .collect();
        let unit_idx = Select::new()
            .with_prompt("  Land area unit")
            .items(&units)
            .default(0)
            .interact()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let has_irrigation = Confirm::new()
            .with_prompt("  Reliable irrigation (well, canal, borewell)?")
            .default(false)
            .interact()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Location (optional) ---
        println!("Location for weather lookup (leave latitude blank to skip)");
        let lat_input: String = Input::new()
            .with_prompt("  Latitude")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;

        let (latitude, longitude) = if lat_input.trim().is_empty() {
            (None, None)
        } else {
            let trimmed = lat_input.trim();
            let latitude: f64 = trimmed
                .parse()
                .map_err(|_| FarmWiseError::Config(format!("Invalid latitude '{}'", trimmed)))?;
            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .interact_text()
                .map_err(|e| FarmWiseError::Config(format!("Input error: {}", e)))?;
            (Some(latitude), Some(longitude))
        };

        println!();

        let config = Config {
            farm: FarmConfig {
                soil: soils[soil_idx].to_string(),
                season: seasons[season_idx].to_string(),
                area_unit: units[unit_idx].to_string(),
                has_irrigation,
                ..FarmConfig::default()
            },
            weather: WeatherConfig {
                latitude,
                longitude,
                ..WeatherConfig::default()
            },
            ..Config::default()
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FarmWiseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# FarmWise Configuration\n# Generated by `farmwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
