pub mod advisory;
pub mod assessor;
pub mod catalog;
pub mod registry;
pub mod risk;
pub mod seasonal;
pub mod water_body;
pub mod znt;

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::assessment::{AssessmentRequest, AssessmentResult, DataSource};
use crate::domain::conditions::EnvironmentalConditions;
use crate::domain::practice::PracticeType;
use crate::domain::product::ProductId;
use crate::domain::regulation::ComplianceStatus;
use crate::errors::{ApplicationError, DomainError};

use self::{
    advisory::AdvisoryInput,
    assessor::{assess_regulations, ProductContribution},
    registry::{ProductRegistry, RegistryError},
    risk::RiskScorer,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineSettings {
    /// Upper bound on one registry call; `None` waits indefinitely.
    pub lookup_timeout: Option<Duration>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { lookup_timeout: Some(Duration::from_secs(10)) }
    }
}

impl From<&AppConfig> for EngineSettings {
    fn from(config: &AppConfig) -> Self {
        Self { lookup_timeout: Some(Duration::from_secs(config.registry.lookup_timeout_secs)) }
    }
}

/// Validated view of an [`AssessmentRequest`].
struct ValidatedRequest {
    practice: PracticeType,
    conditions: EnvironmentalConditions,
    product_ids: Vec<ProductId>,
    crop_code: Option<String>,
    field_size_ha: Option<f64>,
    application_date: NaiveDate,
}

fn validate_request(request: AssessmentRequest) -> Result<ValidatedRequest, DomainError> {
    let product_ids = request.normalized_product_ids();
    let AssessmentRequest {
        practice_type,
        environmental_conditions,
        crop_code,
        field_size_ha,
        application_date,
        ..
    } = request;

    let practice = practice_type
        .as_deref()
        .ok_or(DomainError::MissingPracticeType)?
        .parse::<PracticeType>()?;

    let conditions = environmental_conditions.unwrap_or_default();
    conditions.validate()?;

    if let Some(size) = field_size_ha {
        if !size.is_finite() || size <= 0.0 {
            return Err(DomainError::InvalidRequest {
                field: "field_size_ha",
                reason: format!("must be a finite value greater than zero, got {size}"),
            });
        }
    }

    Ok(ValidatedRequest {
        practice,
        conditions,
        product_ids,
        crop_code: crop_code.filter(|code| !code.trim().is_empty()),
        field_size_ha,
        application_date: application_date.unwrap_or_else(|| Utc::now().date_naive()),
    })
}

/// Entry point of the compliance engine.
///
/// Each call builds and discards its own state; the only shared data are the
/// static catalog and water body tables, so one engine can serve concurrent
/// requests.
pub struct ComplianceEngine<R> {
    registry: R,
    settings: EngineSettings,
    scorer: RiskScorer,
}

impl<R> ComplianceEngine<R>
where
    R: ProductRegistry,
{
    pub fn new(registry: R) -> Self {
        Self::with_settings(registry, EngineSettings::default())
    }

    pub fn with_settings(registry: R, settings: EngineSettings) -> Self {
        Self { registry, settings, scorer: RiskScorer::new() }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Runs a full assessment. Never fails: errors are reported through
    /// `success`, `error` and `error_type` on the result.
    pub async fn assess(&self, request: AssessmentRequest) -> AssessmentResult {
        match self.try_assess(request).await {
            Ok(result) => result,
            Err(error) => {
                warn!(
                    event_name = "compliance.assessment.rejected",
                    error_type = ?error.error_type(),
                    error = %error,
                    "assessment did not complete"
                );
                AssessmentResult::failure(&error)
            }
        }
    }

    pub async fn assess_json(&self, payload: &str) -> AssessmentResult {
        match AssessmentRequest::from_json(payload) {
            Ok(request) => self.assess(request).await,
            Err(error) => {
                warn!(
                    event_name = "compliance.assessment.rejected",
                    error_type = ?error.error_type(),
                    error = %error,
                    "assessment payload could not be decoded"
                );
                AssessmentResult::failure(&error)
            }
        }
    }

    async fn try_assess(
        &self,
        request: AssessmentRequest,
    ) -> Result<AssessmentResult, ApplicationError> {
        let request = validate_request(request)?;
        info!(
            event_name = "compliance.assessment.started",
            practice = %request.practice,
            product_count = request.product_ids.len(),
            "assessment started"
        );

        let (products, lookup_failures) = self.gather_contributions(&request.product_ids).await;
        let conditions = &request.conditions;

        let assessment = assess_regulations(&request.practice, conditions, &products)
            .map_err(|error| DomainError::InvariantViolation(error.to_string()))?;
        let risk = self.scorer.score(&assessment.regulations, conditions);
        if !(0.0..=1.0).contains(&risk.risk_score) {
            return Err(DomainError::InvariantViolation(format!(
                "risk score {} outside [0, 1]",
                risk.risk_score
            ))
            .into());
        }

        let advice = advisory::generate(&AdvisoryInput {
            practice: &request.practice,
            regulations: &assessment.regulations,
            risk: &risk,
            conditions,
            znt_requirements: &assessment.znt_requirements,
            products: &products,
            field_size_ha: request.field_size_ha,
        });
        let seasonal = seasonal::seasonal_restrictions(
            &request.practice,
            request.application_date,
            conditions,
        );

        let compliant_count = assessment
            .regulations
            .iter()
            .filter(|r| r.compliance_status == ComplianceStatus::Compliant)
            .count();
        let data_source = DataSource::from_contributions(
            assessment.catalog_count > 0,
            assessment.registry_count > 0,
        );

        info!(
            event_name = "compliance.assessment.completed",
            practice = %request.practice,
            total_regulations = assessment.regulations.len(),
            non_compliant_count = risk.non_compliant_count,
            risk_level = ?risk.risk_level,
            data_source = ?data_source,
            lookup_failures = lookup_failures.len(),
            "assessment completed"
        );

        Ok(AssessmentResult {
            success: true,
            error: None,
            error_type: None,
            practice_type: Some(request.practice.to_string()),
            total_regulations: assessment.regulations.len(),
            compliant_count,
            non_compliant_count: risk.non_compliant_count,
            znt_requirements: (!assessment.znt_requirements.is_empty())
                .then_some(assessment.znt_requirements),
            water_body: conditions
                .water_body_category
                .map(|category| water_body::classify(Some(category)).to_descriptor()),
            regulations: assessment.regulations,
            risk_assessment: risk,
            recommendations: advice.recommendations,
            critical_warnings: advice.critical_warnings,
            seasonal_restrictions: (!seasonal.is_empty()).then_some(seasonal),
            data_source: Some(data_source),
            lookup_failures,
            crop_code: request.crop_code,
            field_size_ha: request.field_size_ha,
            application_date: Some(request.application_date),
        })
    }

    /// One buffer lookup and one hazard lookup per product, no retries.
    /// A failed buffer lookup skips the product; a failed hazard lookup only
    /// drops the hazard data.
    async fn gather_contributions(
        &self,
        product_ids: &[ProductId],
    ) -> (Vec<ProductContribution>, Vec<ProductId>) {
        let mut contributions = Vec::new();
        let mut failures = Vec::new();

        for product_id in product_ids {
            let buffers = match self
                .bounded(self.registry.lookup_buffer_requirements(product_id))
                .await
            {
                Ok(Some(buffers)) => buffers,
                Ok(None) => {
                    info!(
                        event_name = "compliance.registry.product_not_found",
                        product_id = %product_id,
                        "product unknown to registry, no contribution"
                    );
                    continue;
                }
                Err(error) => {
                    let error = ApplicationError::from(error);
                    warn!(
                        event_name = "compliance.registry.lookup_failed",
                        product_id = %product_id,
                        lookup = "buffer_requirements",
                        error_type = error.error_type().as_str(),
                        error = %error,
                        "skipping product after registry failure"
                    );
                    failures.push(product_id.clone());
                    continue;
                }
            };

            let hazard = match self.bounded(self.registry.lookup_hazard_data(product_id)).await {
                Ok(hazard) => hazard,
                Err(error) => {
                    let error = ApplicationError::from(error);
                    warn!(
                        event_name = "compliance.registry.lookup_failed",
                        product_id = %product_id,
                        lookup = "hazard_data",
                        error_type = error.error_type().as_str(),
                        error = %error,
                        "continuing without hazard data"
                    );
                    None
                }
            };

            contributions.push(ProductContribution {
                product_id: product_id.clone(),
                buffers,
                hazard,
            });
        }

        (contributions, failures)
    }

    async fn bounded<T, F>(&self, lookup: F) -> Result<T, RegistryError>
    where
        F: std::future::Future<Output = Result<T, RegistryError>>,
    {
        match self.settings.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, lookup)
                .await
                .map_err(|_| RegistryError::Timeout(limit.as_secs()))?,
            None => lookup.await,
        }
    }
}
