use crate::error::{FarmWiseError, Result};
use crate::models::PestProfile;

const EMBEDDED_PESTS: &str = include_str!("data/pests.yaml");

#[derive(Debug, Clone)]
pub struct PestDatabase {
    entries: Vec<PestProfile>,
}

impl PestDatabase {
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_PESTS)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let entries: Vec<PestProfile> = serde_yaml::from_str(content)?;
        for entry in &entries {
            if !entry.temp_c.is_valid() || !entry.humidity_pct.is_valid() {
                return Err(FarmWiseError::InvalidData(format!(
                    "{} on {}: invalid temperature or humidity band",
                    entry.pest, entry.crop
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PestProfile] {
        &self.entries
    }

    /// Distinct crop names, in first-seen order.
    pub fn crops(&self) -> Vec<&str> {
        let mut crops: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !crops.contains(&entry.crop.as_str()) {
                crops.push(&entry.crop);
            }
        }
        crops
    }

    pub fn for_crop<'a>(&'a self, crop: &'a str) -> impl Iterator<Item = &'a PestProfile> {
        self.entries
            .iter()
            .filter(move |e| e.crop.eq_ignore_ascii_case(crop.trim()))
    }
}
