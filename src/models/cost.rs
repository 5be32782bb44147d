use serde::{Deserialize, Serialize};

/// Per-acre cultivation costs in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub seed: f64,
    pub fertilizer: f64,
    pub labor: f64,
    pub water: f64,
    pub transport: f64,
}

impl CostBreakdown {
    pub fn per_acre_total(&self) -> f64 {
        self.seed + self.fertilizer + self.labor + self.water + self.transport
    }

    pub fn scaled(&self, acres: f64) -> Self {
        Self {
            seed: self.seed * acres,
            fertilizer: self.fertilizer * acres,
            labor: self.labor * acres,
            water: self.water * acres,
            transport: self.transport * acres,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostProfile {
    pub crop: String,
    pub costs_per_acre: CostBreakdown,
    /// Market prices, oldest first.
    pub historical_prices: Vec<f64>,
}

impl CostProfile {
    pub fn latest_price(&self) -> Option<f64> {
        self.historical_prices.last().copied()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CostEstimate {
    pub crop: String,
    pub area_acres: f64,
    pub costs: CostBreakdown,
    pub total_cost: f64,
    pub predicted_price: f64,
    pub expected_revenue: f64,
    pub expected_profit: f64,
}

impl CostEstimate {
    pub fn is_profitable(&self) -> bool {
        self.expected_profit >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketTrend {
    pub latest: f64,
    pub mean: f64,
    pub change_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_acre_total_sums_all_heads() {
        let costs = CostBreakdown {
            seed: 500.0,
            fertilizer: 800.0,
            labor: 1200.0,
            water: 300.0,
            transport: 200.0,
        };
        assert_eq!(costs.per_acre_total(), 3000.0);
        assert_eq!(costs.scaled(2.0).per_acre_total(), 6000.0);
    }
}
