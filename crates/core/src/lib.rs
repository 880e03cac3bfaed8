pub mod compliance;
pub mod config;
pub mod domain;
pub mod errors;

pub use chrono;

pub use compliance::registry::{EmptyRegistry, ProductRegistry, RegistryError};
pub use compliance::{ComplianceEngine, EngineSettings};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::assessment::{AssessmentRequest, AssessmentResult, DataSource};
pub use domain::conditions::{DriftReductionClass, EnvironmentalConditions, ImpactLevel};
pub use domain::practice::PracticeType;
pub use domain::product::{BufferRequirements, HazardData, ProductId, ToxicityLevel};
pub use domain::regulation::{
    BufferType, ComplianceStatus, RegulationRecord, RegulationType, ZntRequirement,
};
pub use domain::risk::{RiskAssessment, RiskLevel};
pub use domain::water::{WaterBodyCategory, WaterBodyDescriptor};
pub use errors::{ApplicationError, AssessmentErrorType, DomainError};
