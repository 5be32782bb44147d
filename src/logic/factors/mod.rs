pub mod climate;
pub mod site;

pub use climate::{RainfallFactor, TemperatureFactor};
pub use site::{IrrigationFactor, SeasonFactor, SoilFactor};

use crate::models::{CropProfile, Factor, FactorScore, FarmConditions};

/// One weighted component of a crop's suitability score
pub trait SuitabilityFactor: Send + Sync {
    /// Which factor this is; also fixes its weight
    fn factor(&self) -> Factor;

    /// Score `crop` against `conditions`. The returned value is in [0, 1].
    fn evaluate(&self, crop: &CropProfile, conditions: &FarmConditions) -> FactorScore;
}
