use crate::error::{FarmWiseError, Result};
use crate::models::CostProfile;

const EMBEDDED_COSTS: &str = include_str!("data/costs.yaml");

#[derive(Debug, Clone)]
pub struct CostTable {
    profiles: Vec<CostProfile>,
}

impl CostTable {
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_COSTS)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let profiles: Vec<CostProfile> = serde_yaml::from_str(content)?;
        for profile in &profiles {
            if profile.historical_prices.is_empty() {
                return Err(FarmWiseError::InvalidData(format!(
                    "{}: no historical prices",
                    profile.crop
                )));
            }
        }
        Ok(Self { profiles })
    }

    pub fn get(&self, crop: &str) -> Option<&CostProfile> {
        self.profiles
            .iter()
            .find(|p| p.crop.eq_ignore_ascii_case(crop.trim()))
    }

    pub fn profiles(&self) -> &[CostProfile] {
        &self.profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_costs_load() {
        let table = CostTable::embedded().unwrap();
        assert_eq!(table.profiles().len(), 5);
        let rice = table.get("rice").unwrap();
        assert_eq!(rice.costs_per_acre.per_acre_total(), 4000.0);
        assert_eq!(rice.latest_price(), Some(3200.0));
        assert!(table.get("Jute").is_none());
    }

    #[test]
    fn rejects_profile_without_prices() {
        let yaml = r#"
- crop: Millet
  costs_per_acre: { seed: 1, fertilizer: 1, labor: 1, water: 1, transport: 1 }
  historical_prices: []
"#;
        assert!(CostTable::from_yaml_str(yaml).is_err());
    }
}
