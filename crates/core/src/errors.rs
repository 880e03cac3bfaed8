use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compliance::registry::RegistryError;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("practice type is required")]
    MissingPracticeType,
    #[error("invalid practice type `{0}`")]
    InvalidPracticeType(String),
    #[error("invalid environmental conditions: {field} {reason}")]
    InvalidConditions { field: &'static str, reason: String },
    #[error("invalid request field `{field}`: {reason}")]
    InvalidRequest { field: &'static str, reason: String },
    #[error("buffer distance must be a finite value greater than zero, got {0}")]
    InvalidBufferDistance(f64),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Lookup(#[from] RegistryError),
    #[error("malformed request payload: {0}")]
    MalformedPayload(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentErrorType {
    Validation,
    LookupFailure,
    Unknown,
}

impl AssessmentErrorType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::LookupFailure => "lookup_failure",
            Self::Unknown => "unknown",
        }
    }
}

impl ApplicationError {
    pub fn error_type(&self) -> AssessmentErrorType {
        match self {
            Self::Domain(DomainError::InvariantViolation(_)) => AssessmentErrorType::Unknown,
            Self::Domain(_) | Self::MalformedPayload(_) => AssessmentErrorType::Validation,
            Self::Lookup(_) => AssessmentErrorType::LookupFailure,
        }
    }

    pub fn user_message(&self) -> String {
        match self.error_type() {
            AssessmentErrorType::Validation => self.to_string(),
            AssessmentErrorType::LookupFailure => {
                "The product registry is temporarily unavailable. Please retry shortly."
                    .to_string()
            }
            AssessmentErrorType::Unknown => {
                "An unexpected internal error occurred during the assessment.".to_string()
            }
        }
    }
}
