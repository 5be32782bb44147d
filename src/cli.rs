use crate::config::FarmConfig;
use crate::models::FarmInputs;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "farmwise",
    version,
    about = "Crop suitability, pest and cost advisor for smallholder farms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank every crop in the catalog for a farm
    Crops {
        #[command(flatten)]
        farm: FarmArgs,

        #[command(flatten)]
        climate: ClimateArgs,

        /// Number of crops to show (defaults to output.top_n)
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Write the full ranking as JSON to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Predict pests for a crop under given conditions
    Pests {
        crop: String,

        #[arg(long)]
        season: Option<String>,

        #[arg(long)]
        soil: Option<String>,

        /// Temperature in °C
        #[arg(long, default_value_t = crate::models::DEFAULT_AVG_TEMP_C)]
        temp: f64,

        /// Relative humidity in percent (defaults to farm.humidity_pct)
        #[arg(long)]
        humidity: Option<f64>,
    },
    /// Estimate cultivation cost and profit for a crop
    Cost {
        crop: String,

        /// Land area
        #[arg(short, long, default_value_t = 1.0)]
        area: f64,

        /// Area unit (hectare, acre, sqm, bigha, guntha, ground)
        #[arg(short, long)]
        unit: Option<String>,

        /// Seed for the price projection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show historical market prices and trend
    Prices {
        /// Only this crop
        crop: Option<String>,
    },
    /// Recommend a crop with its pest outlook and cost estimate
    Advise {
        #[command(flatten)]
        farm: FarmArgs,

        #[command(flatten)]
        climate: ClimateArgs,

        /// Relative humidity in percent (defaults to farm.humidity_pct)
        #[arg(long)]
        humidity: Option<f64>,

        /// Number of runner-up crops to list
        #[arg(long, default_value_t = 3)]
        alternatives: usize,

        /// Seed for the price projection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List crops in the catalog, or show one crop in detail
    Catalog {
        /// Crop to show
        name: Option<String>,

        /// Only crops in this group (e.g. Pulses)
        #[arg(short, long, conflicts_with = "name")]
        group: Option<String>,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config, catalog and weather connection
    Check,
}

/// Farm details; anything omitted falls back to the `farm` config section.
#[derive(Args, Debug, Clone)]
pub struct FarmArgs {
    #[arg(short, long)]
    pub soil: Option<String>,

    #[arg(long)]
    pub season: Option<String>,

    /// Land area
    #[arg(short, long, default_value_t = 1.0)]
    pub area: f64,

    /// Area unit (hectare, acre, sqm, bigha, guntha, ground)
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Irrigation is available
    #[arg(long, conflicts_with = "no_irrigation")]
    pub irrigation: bool,

    /// Irrigation is not available
    #[arg(long)]
    pub no_irrigation: bool,
}

impl FarmArgs {
    pub fn to_inputs(&self, defaults: &FarmConfig) -> FarmInputs {
        let has_irrigation = if self.irrigation {
            true
        } else if self.no_irrigation {
            false
        } else {
            defaults.has_irrigation
        };
        FarmInputs {
            soil: self.soil.as_ref().unwrap_or(&defaults.soil).clone(),
            season: self.season.as_ref().unwrap_or(&defaults.season).clone(),
            area: self.area,
            unit: self.unit.as_ref().unwrap_or(&defaults.area_unit).clone(),
            has_irrigation,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ClimateArgs {
    /// Latitude for the weather lookup
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude for the weather lookup
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Average temperature in °C, overrides the lookup
    #[arg(long, allow_hyphen_values = true)]
    pub temp: Option<f64>,

    /// Annual rainfall in mm, overrides the lookup
    #[arg(long)]
    pub rain: Option<f64>,

    /// Skip the weather lookup
    #[arg(long)]
    pub no_weather: bool,

    /// Do not fill missing climate values with seasonal defaults
    #[arg(long)]
    pub raw_climate: bool,
}
