use super::SuitabilityFactor;
use crate::models::{CropProfile, Factor, FactorScore, FarmConditions};

/// Soil match: all or nothing on the catalog's compatible soils.
pub struct SoilFactor;

impl SuitabilityFactor for SoilFactor {
    fn factor(&self) -> Factor {
        Factor::Soil
    }

    fn evaluate(&self, crop: &CropProfile, conditions: &FarmConditions) -> FactorScore {
        if crop.suits_soil(&conditions.soil) {
            FactorScore::new(Factor::Soil, 1.0, "Soil suitable")
        } else {
            FactorScore::new(Factor::Soil, 0.0, "Soil not ideal")
        }
    }
}

/// Season match. Perennial crops fit every season.
pub struct SeasonFactor;

impl SuitabilityFactor for SeasonFactor {
    fn factor(&self) -> Factor {
        Factor::Season
    }

    fn evaluate(&self, crop: &CropProfile, conditions: &FarmConditions) -> FactorScore {
        if crop.grows_in(&conditions.season) {
            FactorScore::new(Factor::Season, 1.0, "Season suitable")
        } else {
            FactorScore::new(Factor::Season, 0.0, "Season not ideal")
        }
    }
}

/// Irrigation: zero only when the crop needs water the farm can't supply.
pub struct IrrigationFactor;

impl SuitabilityFactor for IrrigationFactor {
    fn factor(&self) -> Factor {
        Factor::Irrigation
    }

    fn evaluate(&self, crop: &CropProfile, conditions: &FarmConditions) -> FactorScore {
        if crop.requires_irrigation && !conditions.has_irrigation {
            FactorScore::new(
                Factor::Irrigation,
                0.0,
                "Irrigation needed but not available",
            )
        } else {
            FactorScore::new(Factor::Irrigation, 1.0, "Irrigation OK")
        }
    }
}
