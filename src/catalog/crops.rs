use crate::error::{FarmWiseError, Result};
use crate::models::CropProfile;
use std::collections::HashMap;
use std::path::Path;

const EMBEDDED_CROPS: &str = include_str!("data/crops.yaml");

/// Read-only crop table. Entries keep their file order; lookups by name go
/// through a case-insensitive index.
#[derive(Debug, Clone)]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
    index: HashMap<String, usize>,
}

impl CropCatalog {
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_CROPS)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&content)?;
        if catalog.is_empty() {
            return Err(FarmWiseError::InvalidData(format!(
                "Crop table {} has no crops",
                path.display()
            )));
        }
        tracing::info!("Loaded {} crops from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let crops: Vec<CropProfile> = serde_yaml::from_str(content)?;
        Self::from_crops(crops)
    }

    pub fn from_crops(crops: Vec<CropProfile>) -> Result<Self> {
        let mut index = HashMap::with_capacity(crops.len());
        for (i, crop) in crops.iter().enumerate() {
            validate(crop)?;
            if index.insert(crop.name.to_lowercase(), i).is_some() {
                return Err(FarmWiseError::InvalidData(format!(
                    "Duplicate crop '{}' in catalog",
                    crop.name
                )));
            }
        }
        Ok(Self { crops, index })
    }

    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.crops[i])
    }

    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropProfile> {
        self.crops.iter()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

fn validate(crop: &CropProfile) -> Result<()> {
    if crop.name.trim().is_empty() {
        return Err(FarmWiseError::InvalidData("Crop with empty name".into()));
    }
    if crop.base_yield_kg_per_ha.is_nan() || crop.base_yield_kg_per_ha <= 0.0 {
        return Err(FarmWiseError::InvalidData(format!(
            "{}: base yield must be positive, got {}",
            crop.name, crop.base_yield_kg_per_ha
        )));
    }
    for (label, range) in [("rain_mm", crop.rain_range), ("temp_c", crop.temp_range)] {
        if let Some(r) = range {
            if !r.is_valid() {
                return Err(FarmWiseError::InvalidData(format!(
                    "{}: invalid {} range {}",
                    crop.name, label, r
                )));
            }
        }
    }
    if crop.seasons.is_empty() {
        return Err(FarmWiseError::InvalidData(format!(
            "{}: no seasons listed",
            crop.name
        )));
    }
    Ok(())
}
