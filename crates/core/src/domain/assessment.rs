use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::conditions::EnvironmentalConditions;
use crate::domain::product::ProductId;
use crate::domain::regulation::{BufferType, RegulationRecord, ZntRequirement};
use crate::domain::risk::RiskAssessment;
use crate::domain::water::WaterBodyDescriptor;
use crate::errors::{ApplicationError, AssessmentErrorType};

/// Inbound assessment request. The practice type is kept raw so that a
/// missing or malformed value is reported as a validation failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssessmentRequest {
    pub practice_type: Option<String>,
    pub environmental_conditions: Option<EnvironmentalConditions>,
    pub product_ids: Vec<String>,
    pub crop_code: Option<String>,
    pub field_size_ha: Option<f64>,
    pub application_date: Option<NaiveDate>,
}

impl AssessmentRequest {
    pub fn new(practice_type: impl Into<String>) -> Self {
        Self { practice_type: Some(practice_type.into()), ..Self::default() }
    }

    pub fn with_conditions(mut self, conditions: EnvironmentalConditions) -> Self {
        self.environmental_conditions = Some(conditions);
        self
    }

    pub fn with_products<I, S>(mut self, product_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_ids = product_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_crop_code(mut self, crop_code: impl Into<String>) -> Self {
        self.crop_code = Some(crop_code.into());
        self
    }

    pub fn with_field_size_ha(mut self, field_size_ha: f64) -> Self {
        self.field_size_ha = Some(field_size_ha);
        self
    }

    pub fn with_application_date(mut self, date: NaiveDate) -> Self {
        self.application_date = Some(date);
        self
    }

    pub fn from_json(payload: &str) -> Result<Self, ApplicationError> {
        serde_json::from_str(payload)
            .map_err(|error| ApplicationError::MalformedPayload(error.to_string()))
    }

    /// Trimmed, de-duplicated product identifiers in request order.
    pub fn normalized_product_ids(&self) -> Vec<ProductId> {
        let mut seen = Vec::new();
        for raw in &self.product_ids {
            let id = raw.trim();
            if id.is_empty() || seen.iter().any(|existing: &ProductId| existing.0 == id) {
                continue;
            }
            seen.push(ProductId(id.to_string()));
        }
        seen
    }
}

/// Where the evaluated regulations came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    CatalogOnly,
    RegistryOnly,
    Hybrid,
}

impl DataSource {
    pub fn from_contributions(catalog: bool, registry: bool) -> Self {
        match (catalog, registry) {
            (true, true) => Self::Hybrid,
            (false, true) => Self::RegistryOnly,
            // No contribution at all is reported as catalog-only.
            (true, false) | (false, false) => Self::CatalogOnly,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<AssessmentErrorType>,
    pub practice_type: Option<String>,
    pub regulations: Vec<RegulationRecord>,
    pub risk_assessment: RiskAssessment,
    pub znt_requirements: Option<BTreeMap<BufferType, ZntRequirement>>,
    pub water_body: Option<WaterBodyDescriptor>,
    pub recommendations: Vec<String>,
    pub critical_warnings: Vec<String>,
    pub seasonal_restrictions: Option<Vec<String>>,
    pub total_regulations: usize,
    pub compliant_count: usize,
    pub non_compliant_count: usize,
    pub data_source: Option<DataSource>,
    pub lookup_failures: Vec<ProductId>,
    pub crop_code: Option<String>,
    pub field_size_ha: Option<f64>,
    pub application_date: Option<NaiveDate>,
}

impl AssessmentResult {
    /// Failure response: nothing but the error is populated.
    pub fn failure(error: &ApplicationError) -> Self {
        Self {
            success: false,
            error: Some(error.user_message()),
            error_type: Some(error.error_type()),
            ..Self::default()
        }
    }
}
