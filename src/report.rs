use crate::error::Result;
use crate::logic::Advice;
use crate::models::{
    round_to, ClimateSource, CostEstimate, CostProfile, CropProfile, ExportRecord, Factor,
    FarmConditions, InputFallback, MarketTrend, PestProfile, Range, ScoreResult,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Farm inputs as they were actually scored.
#[derive(Debug, Clone, Serialize)]
pub struct ExportInputs {
    pub soil: String,
    pub season: String,
    pub has_irrigation: bool,
    pub avg_temp_c: Option<f64>,
    pub annual_rain_mm: Option<f64>,
    pub area_hectares: f64,
    pub climate_source: ClimateSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope {
    pub generated_at: DateTime<Utc>,
    pub inputs: ExportInputs,
    pub fallbacks: Vec<InputFallback>,
    pub results: Vec<ExportRecord>,
}

impl ExportEnvelope {
    pub fn new(
        conditions: &FarmConditions,
        climate_source: ClimateSource,
        results: &[ScoreResult],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            inputs: ExportInputs {
                soil: conditions.soil.clone(),
                season: conditions.season.to_string(),
                has_irrigation: conditions.has_irrigation,
                avg_temp_c: conditions.avg_temp_c,
                annual_rain_mm: conditions.annual_rain_mm,
                area_hectares: round_to(conditions.area_hectares, 4),
                climate_source,
            },
            fallbacks: conditions.fallbacks.clone(),
            results: results
                .iter()
                .enumerate()
                .map(|(i, r)| ExportRecord::from_result(i + 1, r))
                .collect(),
        }
    }
}

pub fn write_json_export(path: &Path, envelope: &ExportEnvelope) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(envelope)?;
    std::fs::write(path, json)?;
    tracing::info!(
        "Exported {} results to {}",
        envelope.results.len(),
        path.display()
    );
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn fmt_measure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, unit),
        None => "unknown".to_string(),
    }
}

pub fn render_conditions(conditions: &FarmConditions, climate_source: ClimateSource) -> String {
    let mut lines = vec![
        format!(
            "Farm: {} soil, {} season, {:.2} ha, irrigation {}",
            conditions.soil,
            conditions.season,
            conditions.area_hectares,
            yes_no(conditions.has_irrigation)
        ),
        format!(
            "Climate ({}): avg {}, rain {}",
            climate_source,
            fmt_measure(conditions.avg_temp_c, "°C"),
            fmt_measure(conditions.annual_rain_mm, " mm/yr")
        ),
    ];
    for fallback in &conditions.fallbacks {
        lines.push(format!("  note: {}", fallback));
    }
    lines.join("\n")
}

pub fn render_ranking(results: &[ScoreResult], top: usize) -> String {
    if results.is_empty() {
        return "No crops in catalog.".to_string();
    }

    let mut lines = vec![format!(
        "{:>3}  {:<28} {:>6}  {:>10}  {:>12}",
        "#", "Crop", "Score", "kg/ha", "Total kg"
    )];
    for (i, r) in results.iter().take(top).enumerate() {
        lines.push(format!(
            "{:>3}  {:<28} {:>5.1}%  {:>10.1}  {:>12.1}",
            i + 1,
            r.crop,
            r.score_pct(),
            r.est_yield_per_ha,
            r.total_est_yield
        ));
        lines.push(format!("     {}", r.reasons.join("; ")));
    }
    if results.len() > top {
        lines.push(format!("... {} more", results.len() - top));
    }
    lines.join("\n")
}

pub fn render_pests(crop: &str, pests: &[&PestProfile]) -> String {
    if pests.is_empty() {
        return format!("No major pests predicted for {}.", crop);
    }
    let mut lines = vec![format!("Pest risk for {}:", crop)];
    for p in pests {
        lines.push(format!(
            "  {} ({} °C, {} % RH)",
            p.pest, p.temp_c, p.humidity_pct
        ));
        lines.push(format!("    Prevention: {}", p.prevention));
    }
    lines.join("\n")
}

pub fn render_cost(estimate: &CostEstimate) -> String {
    let c = &estimate.costs;
    let mut lines = vec![
        format!("{} on {:.2} acres", estimate.crop, estimate.area_acres),
        format!("  Seed:        ₹{:>12.2}", c.seed),
        format!("  Fertilizer:  ₹{:>12.2}", c.fertilizer),
        format!("  Labor:       ₹{:>12.2}", c.labor),
        format!("  Water:       ₹{:>12.2}", c.water),
        format!("  Transport:   ₹{:>12.2}", c.transport),
        format!("  Total cost:  ₹{:>12.2}", estimate.total_cost),
        format!(
            "  Price/unit:  ₹{:>12.2} (projected)",
            estimate.predicted_price
        ),
        format!("  Revenue:     ₹{:>12.2}", estimate.expected_revenue),
        format!("  Profit:      ₹{:>12.2}", estimate.expected_profit),
    ];
    if !estimate.is_profitable() {
        lines.push("  Projected to run at a loss.".to_string());
    }
    lines.join("\n")
}

pub fn render_prices(profile: &CostProfile, trend: Option<&MarketTrend>) -> String {
    let history: Vec<String> = profile
        .historical_prices
        .iter()
        .map(|p| format!("{:.0}", p))
        .collect();
    let mut line = format!("{:<12} {}", profile.crop, history.join(" → "));
    if let Some(t) = trend {
        line.push_str(&format!("  (avg {:.1}, {:+.1}%)", t.mean, t.change_pct));
    }
    line
}

fn fmt_range(range: Option<Range>) -> String {
    match range {
        Some(r) => r.to_string(),
        None => "any".to_string(),
    }
}

fn fmt_seasons(crop: &CropProfile) -> String {
    let seasons: Vec<&str> = crop.seasons.iter().map(|s| s.as_str()).collect();
    seasons.join("/")
}

pub fn render_catalog<'a>(crops: impl Iterator<Item = &'a CropProfile>) -> String {
    let mut lines = Vec::new();
    for crop in crops {
        let irrigated = if crop.requires_irrigation {
            "  [irrigated]"
        } else {
            ""
        };
        lines.push(format!(
            "{:<28} {:<12} {:<22} rain {:<11} temp {:<7} {:>6.0} kg/ha{}",
            crop.name,
            crop.group.as_deref().unwrap_or("-"),
            fmt_seasons(crop),
            fmt_range(crop.rain_range),
            fmt_range(crop.temp_range),
            crop.base_yield_kg_per_ha,
            irrigated
        ));
    }
    if lines.is_empty() {
        return "No matching crops.".to_string();
    }
    lines.join("\n")
}

pub fn render_crop_detail(crop: &CropProfile) -> String {
    let lines = [
        crop.name.clone(),
        format!("  Group:       {}", crop.group.as_deref().unwrap_or("-")),
        format!("  Soils:       {}", crop.compatible_soils.join(", ")),
        format!("  Seasons:     {}", fmt_seasons(crop)),
        format!("  Rainfall:    {} mm/yr", fmt_range(crop.rain_range)),
        format!("  Temperature: {} °C", fmt_range(crop.temp_range)),
        format!("  Irrigation:  {}", yes_no(crop.requires_irrigation)),
        format!("  Base yield:  {:.0} kg/ha", crop.base_yield_kg_per_ha),
    ];
    lines.join("\n")
}

pub fn render_no_pest_data(crop: &str, covered: &[&str]) -> String {
    format!(
        "No pest data for {}. Pest data covers: {}.",
        crop,
        covered.join(", ")
    )
}

/// Per-factor sub-scores, e.g. `Soil 1.00 x 0.30`.
fn render_factors(result: &ScoreResult) -> String {
    let parts: Vec<String> = Factor::all()
        .iter()
        .filter_map(|f| result.factor(*f))
        .map(|fs| format!("{} {:.2} x {:.2}", fs.factor, fs.value, fs.weight))
        .collect();
    parts.join(", ")
}

pub fn render_advice(advice: &Advice<'_>) -> String {
    let top = &advice.top;
    let summary = [
        format!("Recommended crop: {} ({:.1}%)", top.crop, top.score_pct()),
        format!("  {}", top.reasons.join("; ")),
        format!("  Factors: {}", render_factors(top)),
        format!(
            "  Expected yield: {:.1} kg/ha, {:.1} kg total",
            top.est_yield_per_ha, top.total_est_yield
        ),
    ];
    let mut sections = vec![summary.join("\n")];

    if !advice.alternatives.is_empty() {
        let alts: Vec<String> = advice
            .alternatives
            .iter()
            .map(|r| format!("{} ({:.1}%)", r.crop, r.score_pct()))
            .collect();
        sections.push(format!("Alternatives: {}", alts.join(", ")));
    }

    if advice.pest_data_available {
        sections.push(render_pests(&top.crop, &advice.pests));
    } else {
        sections.push(format!("No pest data for {}.", top.crop));
    }

    match advice.cost {
        Some(ref estimate) => sections.push(render_cost(estimate)),
        None => sections.push(format!("No cost data for {}.", top.crop)),
    }

    sections.join("\n\n")
}
