use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::memory::InMemoryProductRegistry;
use crate::ProductRecord;

#[derive(Debug, Error)]
pub enum RegistryLoadError {
    #[error("could not read product registry `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse product registry `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("product `{0}` is declared more than once")]
    DuplicateProduct(String),
    #[error("product `{id}` is invalid: {reason}")]
    InvalidProduct { id: String, reason: String },
}

/// On-disk registry document: `{"products": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    pub products: Vec<ProductRecord>,
}

impl RegistryFile {
    pub fn parse(raw: &str, path: &Path) -> Result<Self, RegistryLoadError> {
        let mut file: Self = serde_json::from_str(raw)
            .map_err(|source| RegistryLoadError::Parse { path: path.to_path_buf(), source })?;
        for record in &mut file.products {
            record.id.0 = record.id.0.trim().to_string();
        }
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<(), RegistryLoadError> {
        let mut seen = HashSet::new();

        for record in &self.products {
            let id = record.id.0.as_str();
            if id.is_empty() {
                return Err(RegistryLoadError::InvalidProduct {
                    id: String::new(),
                    reason: "id must not be empty".to_string(),
                });
            }
            if !seen.insert(id.to_string()) {
                return Err(RegistryLoadError::DuplicateProduct(id.to_string()));
            }

            let figures = [
                ("aquatic_m", record.buffers.aquatic_m),
                ("arthropod_m", record.buffers.arthropod_m),
                ("plant_m", record.buffers.plant_m),
            ];
            for (field, value) in figures {
                if let Some(distance) = value {
                    if !distance.is_finite() || distance < 0.0 {
                        return Err(RegistryLoadError::InvalidProduct {
                            id: id.to_string(),
                            reason: format!("{field} must be a non-negative distance, got {distance}"),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Reads a JSON registry file into an in-memory registry.
pub async fn load_registry_file(path: &Path) -> Result<InMemoryProductRegistry, RegistryLoadError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RegistryLoadError::Read { path: path.to_path_buf(), source })?;
    let file = RegistryFile::parse(&raw, path)?;

    info!(
        event_name = "registry.file.loaded",
        path = %path.display(),
        product_count = file.products.len(),
        "product registry loaded"
    );

    Ok(InMemoryProductRegistry::from_records(file.products))
}
