//! Product registry adapters for the compliance engine.
//!
//! Both adapters serve the same [`ProductRecord`] shape: one in-memory map,
//! optionally seeded from a JSON file on disk.

use serde::{Deserialize, Serialize};

use agriconform_core::domain::product::{BufferRequirements, HazardData, ProductId};

pub mod file;
pub mod memory;

pub use file::{load_registry_file, RegistryFile, RegistryLoadError};
pub use memory::InMemoryProductRegistry;

/// One registered plant-protection product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub buffers: BufferRequirements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazard: Option<HazardData>,
}

impl ProductRecord {
    pub fn new(id: impl Into<String>, buffers: BufferRequirements) -> Self {
        Self { id: ProductId(id.into()), name: None, buffers, hazard: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_hazard(mut self, hazard: HazardData) -> Self {
        self.hazard = Some(hazard);
        self
    }
}
