pub mod costs;
pub mod crops;
pub mod pests;

pub use costs::CostTable;
pub use crops::CropCatalog;
pub use pests::PestDatabase;

use crate::config::Config;
use crate::error::Result;

/// All reference tables an advisor run needs, loaded once.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub crops: CropCatalog,
    pub pests: PestDatabase,
    pub costs: CostTable,
}

impl Catalog {
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            crops: CropCatalog::embedded()?,
            pests: PestDatabase::embedded()?,
            costs: CostTable::embedded()?,
        })
    }

    /// Embedded tables, with the crop table replaced when the config names a file.
    pub fn load(config: &Config) -> Result<Self> {
        let mut catalog = Self::embedded()?;
        if let Some(ref path) = config.catalog.crops_path {
            catalog.crops = CropCatalog::from_path(path)?;
        }
        tracing::debug!(
            "Catalog ready: {} crops, {} pest entries, {} cost profiles",
            catalog.crops.len(),
            catalog.pests.entries().len(),
            catalog.costs.profiles().len()
        );
        Ok(catalog)
    }
}
