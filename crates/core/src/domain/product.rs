use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::conditions::ImpactLevel;
use crate::domain::regulation::BufferType;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-product legal buffer distances, in meters, as published by the registry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferRequirements {
    pub aquatic_m: Option<f64>,
    pub arthropod_m: Option<f64>,
    pub plant_m: Option<f64>,
}

impl BufferRequirements {
    /// Buffers with a usable, strictly positive figure.
    pub fn figures(&self) -> Vec<(BufferType, f64)> {
        [
            (BufferType::Aquatic, self.aquatic_m),
            (BufferType::Arthropod, self.arthropod_m),
            (BufferType::Plant, self.plant_m),
        ]
        .into_iter()
        .filter_map(|(buffer, value)| match value {
            Some(distance) if distance.is_finite() && distance > 0.0 => Some((buffer, distance)),
            _ => None,
        })
        .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToxicityLevel {
    #[default]
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ToxicityLevel {
    pub fn impact_level(self) -> ImpactLevel {
        match self {
            Self::Low => ImpactLevel::Low,
            Self::Moderate => ImpactLevel::Moderate,
            Self::High => ImpactLevel::High,
            Self::VeryHigh => ImpactLevel::Critical,
        }
    }

    pub fn is_high(self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardData {
    pub substances: Vec<String>,
    pub is_cmr: bool,
    pub aquatic_toxicity_level: ToxicityLevel,
    pub bee_toxicity: ToxicityLevel,
}
