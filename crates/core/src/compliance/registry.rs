use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::{BufferRequirements, HazardData, ProductId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("product registry unavailable: {0}")]
    Unavailable(String),
    #[error("product registry lookup timed out after {0}s")]
    Timeout(u64),
}

/// External source of per-product buffer and hazard figures.
///
/// `Ok(None)` means the product is unknown to the registry and contributes
/// nothing; it is not an error.
#[async_trait]
pub trait ProductRegistry: Send + Sync {
    async fn lookup_buffer_requirements(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<BufferRequirements>, RegistryError>;

    async fn lookup_hazard_data(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<HazardData>, RegistryError>;
}

/// Registry with no products, for catalog-only deployments.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyRegistry;

#[async_trait]
impl ProductRegistry for EmptyRegistry {
    async fn lookup_buffer_requirements(
        &self,
        _product_id: &ProductId,
    ) -> Result<Option<BufferRequirements>, RegistryError> {
        Ok(None)
    }

    async fn lookup_hazard_data(
        &self,
        _product_id: &ProductId,
    ) -> Result<Option<HazardData>, RegistryError> {
        Ok(None)
    }
}
