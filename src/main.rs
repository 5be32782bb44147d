mod catalog;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;

use catalog::Catalog;
use clap::{CommandFactory, Parser};
use cli::{Cli, ClimateArgs, Commands, FarmArgs};
use config::Config;
use datasources::OpenMeteoClient;
use error::{FarmWiseError, Result};
use logic::{costs, pests::predict_pests, Advisor, ScoringEngine};
use models::{ClimateEstimate, ClimateSource, FarmConditions, PestQuery, Season};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Slack on top of the HTTP timeout for the whole weather lookup.
const LOOKUP_GRACE_SECS: u64 = 2;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Some(c) => c,
        None => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    // Init must work even when the existing config is broken
    if let Commands::Init = command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = match Config::load_or_default(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!(
                "Run `farmwise init` or copy config/config.yaml.example to config/config.yaml"
            );
            std::process::exit(1);
        }
    };
    let catalog = Catalog::load(&config)?;

    match command {
        Commands::Crops {
            farm,
            climate,
            top,
            export,
        } => {
            let (conditions, source) = build_conditions(&config, &farm, &climate).await?;
            let results = logic::evaluate(catalog.crops.crops(), &conditions);

            println!("{}", report::render_conditions(&conditions, source));
            println!();
            println!(
                "{}",
                report::render_ranking(&results, top.unwrap_or(config.output.top_n))
            );

            if let Some(path) = export {
                let path = match config.output.export_dir {
                    Some(ref dir) if path.is_relative() => dir.join(path),
                    _ => path,
                };
                let envelope = report::ExportEnvelope::new(&conditions, source, &results);
                report::write_json_export(&path, &envelope)?;
                println!();
                println!("Saved ranking to {}", path.display());
            }
        }
        Commands::Pests {
            crop,
            season,
            soil,
            temp,
            humidity,
        } => {
            let season = season.unwrap_or_else(|| config.farm.season.clone());
            let soil = soil.unwrap_or_else(|| config.farm.soil.clone());
            let query = PestQuery {
                crop,
                season: Season::parse(&season).to_string(),
                soil: models::normalize_soil(&soil).label,
                temp_c: temp,
                humidity_pct: humidity.unwrap_or(config.farm.humidity_pct),
            };
            if catalog.pests.for_crop(&query.crop).next().is_none() {
                let covered = catalog.pests.crops();
                println!("{}", report::render_no_pest_data(&query.crop, &covered));
                return Ok(());
            }
            let pests = predict_pests(&catalog.pests, &query);
            println!("{}", report::render_pests(&query.crop, &pests));
        }
        Commands::Cost {
            crop,
            area,
            unit,
            seed,
        } => {
            let unit = unit.unwrap_or_else(|| config.farm.area_unit.clone());
            let mut rng = price_rng(seed);
            let estimate = costs::estimate(&catalog.costs, &crop, area, &unit, &mut rng)?;
            println!("{}", report::render_cost(&estimate));
        }
        Commands::Prices { crop } => {
            let profiles: Vec<_> = match crop {
                Some(ref name) => vec![catalog.costs.get(name).ok_or_else(|| {
                    FarmWiseError::NotFound(format!("No price data for crop '{}'", name))
                })?],
                None => catalog.costs.profiles().iter().collect(),
            };
            for profile in profiles {
                let trend = costs::market_trend(profile);
                println!("{}", report::render_prices(profile, trend.as_ref()));
            }
        }
        Commands::Advise {
            farm,
            climate,
            humidity,
            alternatives,
            seed,
        } => {
            let (conditions, source) = build_conditions(&config, &farm, &climate).await?;
            let mut rng = price_rng(seed);
            let advice = Advisor::new(&catalog).advise(
                &conditions,
                humidity.unwrap_or(config.farm.humidity_pct),
                alternatives,
                &mut rng,
            )?;

            println!("{}", report::render_conditions(&conditions, source));
            println!();
            println!("{}", report::render_advice(&advice));
        }
        Commands::Catalog {
            name: Some(name),
            ..
        } => {
            let crop = catalog
                .crops
                .get(&name)
                .ok_or_else(|| FarmWiseError::NotFound(format!("No crop named '{}'", name)))?;
            println!("{}", report::render_crop_detail(crop));
        }
        Commands::Catalog { name: None, group } => {
            let crops = catalog.crops.iter().filter(|c| match group {
                Some(ref g) => c
                    .group
                    .as_deref()
                    .is_some_and(|cg| cg.eq_ignore_ascii_case(g.trim())),
                None => true,
            });
            println!("{}", report::render_catalog(crops));
        }
        Commands::Check => check(&config, &catalog).await?,
        Commands::Init => {}
    }

    Ok(())
}

fn price_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn lookup_limit(timeout_secs: u64) -> Duration {
    Duration::from_secs(timeout_secs.saturating_add(LOOKUP_GRACE_SECS))
}

/// Normalize farm inputs and attach climate. Lookup failures degrade to an
/// absent estimate; manual `--temp`/`--rain` values override the lookup.
async fn build_conditions(
    config: &Config,
    farm: &FarmArgs,
    climate: &ClimateArgs,
) -> Result<(FarmConditions, ClimateSource)> {
    let fetched = if climate.no_weather || !config.weather.enabled {
        ClimateEstimate::absent()
    } else {
        fetch_climate(config, climate).await
    };
    resolve_conditions(config, farm, climate, fetched)
}

fn resolve_conditions(
    config: &Config,
    farm: &FarmArgs,
    climate: &ClimateArgs,
    fetched: ClimateEstimate,
) -> Result<(FarmConditions, ClimateSource)> {
    if !farm.area.is_finite() || farm.area <= 0.0 {
        return Err(FarmWiseError::InvalidData(format!(
            "Land area must be positive, got {}",
            farm.area
        )));
    }
    for (flag, value) in [("--temp", climate.temp), ("--rain", climate.rain)] {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(FarmWiseError::InvalidData(format!(
                "{} must be a finite number",
                flag
            )));
        }
    }

    let inputs = farm.to_inputs(&config.farm);
    let conditions = FarmConditions::from_inputs(&inputs);

    let estimate = fetched.merge(&ClimateEstimate::manual(climate.temp, climate.rain));
    if estimate.is_empty() {
        tracing::info!("No climate measurements available");
    }

    if climate.raw_climate {
        let source = estimate.source;
        Ok((conditions.with_climate(&estimate), source))
    } else {
        let source = estimate.with_defaults(&conditions.season).source;
        Ok((conditions.with_resolved_climate(&estimate), source))
    }
}

async fn fetch_climate(config: &Config, climate: &ClimateArgs) -> ClimateEstimate {
    let coordinates = climate.lat.zip(climate.lon);
    let (lat, lon) = match coordinates.or(config.weather.coordinates()) {
        Some(coords) => coords,
        None => {
            tracing::debug!("No coordinates given, skipping weather lookup");
            return ClimateEstimate::absent();
        }
    };

    let client = match OpenMeteoClient::new(config.weather.clone()) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create Open-Meteo client: {}", e);
            return ClimateEstimate::absent();
        }
    };

    let limit = lookup_limit(config.weather.timeout_secs);
    match tokio::time::timeout(limit, client.fetch_climate(lat, lon)).await {
        Ok(Ok(estimate)) => estimate,
        Ok(Err(e)) => {
            tracing::warn!("Weather lookup failed, using defaults: {}", e);
            ClimateEstimate::absent()
        }
        Err(_) => {
            tracing::warn!("Weather lookup timed out after {:?}, using defaults", limit);
            ClimateEstimate::absent()
        }
    }
}

async fn check(config: &Config, catalog: &Catalog) -> Result<()> {
    println!("Config:   OK");
    println!(
        "Catalog:  {} crops, {} pest entries, {} cost profiles",
        catalog.crops.len(),
        catalog.pests.entries().len(),
        catalog.costs.profiles().len()
    );
    let weights: Vec<String> = ScoringEngine::new()
        .list_factors()
        .into_iter()
        .map(|(factor, weight)| format!("{} {:.2}", factor.as_str(), weight))
        .collect();
    println!("Scoring:  {}", weights.join(", "));

    if !config.weather.enabled {
        println!("Weather:  disabled");
        return Ok(());
    }
    let (lat, lon) = match config.weather.coordinates() {
        Some(coords) => coords,
        None => {
            println!("Weather:  no coordinates configured");
            return Ok(());
        }
    };

    let client = OpenMeteoClient::new(config.weather.clone())?;
    match client.test_connection(lat, lon).await {
        Ok(true) => println!("Weather:  Open-Meteo OK"),
        Ok(false) => println!("Weather:  Open-Meteo returned an error status"),
        Err(e) => println!("Weather:  OFFLINE ({})", e),
    }
    Ok(())
}
