use std::collections::HashMap;

use tokio::sync::RwLock;

use agriconform_core::compliance::registry::{ProductRegistry, RegistryError};
use agriconform_core::domain::product::{BufferRequirements, HazardData, ProductId};

use crate::ProductRecord;

#[derive(Debug, Default)]
pub struct InMemoryProductRegistry {
    products: RwLock<HashMap<String, ProductRecord>>,
}

impl InMemoryProductRegistry {
    /// Later records replace earlier ones with the same id.
    pub fn from_records(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        let products = records.into_iter().map(|record| (record.id.0.clone(), record)).collect();
        Self { products: RwLock::new(products) }
    }

    pub async fn save(&self, record: ProductRecord) {
        let mut products = self.products.write().await;
        products.insert(record.id.0.clone(), record);
    }

    pub async fn find_by_id(&self, id: &ProductId) -> Option<ProductRecord> {
        let products = self.products.read().await;
        products.get(&id.0).cloned()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ProductRegistry for InMemoryProductRegistry {
    async fn lookup_buffer_requirements(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<BufferRequirements>, RegistryError> {
        Ok(self.find_by_id(product_id).await.map(|record| record.buffers))
    }

    async fn lookup_hazard_data(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<HazardData>, RegistryError> {
        Ok(self.find_by_id(product_id).await.and_then(|record| record.hazard))
    }
}
