use crate::catalog::CostTable;
use crate::error::{FarmWiseError, Result};
use crate::models::{round_to, to_hectares, AreaUnit, CostEstimate, CostProfile, MarketTrend};
use rand::Rng;

/// Projected price swing around the latest market price.
pub const PRICE_DRIFT_LOW: f64 = -0.05;
pub const PRICE_DRIFT_HIGH: f64 = 0.10;

pub fn to_acres(value: f64, unit: &str) -> f64 {
    to_hectares(value, unit).hectares / AreaUnit::Acre.hectares_per_unit()
}

/// Latest price nudged by a uniform draw in [-5%, +10%), rounded to paise.
pub fn predict_price<R: Rng + ?Sized>(profile: &CostProfile, rng: &mut R) -> Result<f64> {
    let latest = profile.latest_price().ok_or_else(|| {
        FarmWiseError::InvalidData(format!("{}: no historical prices", profile.crop))
    })?;
    let drift = rng.gen_range(PRICE_DRIFT_LOW..PRICE_DRIFT_HIGH);
    Ok(round_to(latest * (1.0 + drift), 2))
}

pub fn market_trend(profile: &CostProfile) -> Option<MarketTrend> {
    let first = *profile.historical_prices.first()?;
    let latest = *profile.historical_prices.last()?;
    let mean =
        profile.historical_prices.iter().sum::<f64>() / profile.historical_prices.len() as f64;
    let change_pct = if first.abs() > f64::EPSILON {
        (latest - first) / first * 100.0
    } else {
        0.0
    };
    Some(MarketTrend {
        latest,
        mean,
        change_pct,
    })
}

/// Cultivation cost, projected revenue and profit for `area` in `unit`.
/// Costs and revenue are both charged per acre.
pub fn estimate<R: Rng + ?Sized>(
    table: &CostTable,
    crop: &str,
    area: f64,
    unit: &str,
    rng: &mut R,
) -> Result<CostEstimate> {
    if !area.is_finite() || area <= 0.0 {
        return Err(FarmWiseError::InvalidData(format!(
            "Land area must be positive, got {}",
            area
        )));
    }
    let profile = table
        .get(crop)
        .ok_or_else(|| FarmWiseError::NotFound(format!("No cost data for crop '{}'", crop)))?;

    let area_acres = to_acres(area, unit);
    let costs = profile.costs_per_acre.scaled(area_acres);
    let total_cost = profile.costs_per_acre.per_acre_total() * area_acres;
    let predicted_price = predict_price(profile, rng)?;
    let expected_revenue = predicted_price * area_acres;

    Ok(CostEstimate {
        crop: profile.crop.clone(),
        area_acres,
        costs,
        total_cost,
        predicted_price,
        expected_revenue,
        expected_profit: expected_revenue - total_cost,
    })
}
