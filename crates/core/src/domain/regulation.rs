use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::conditions::{DriftReductionClass, ImpactLevel};
use crate::domain::product::ProductId;
use crate::domain::water::WaterBodyCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulationType {
    ZntCompliance,
    WaterProtection,
    BiodiversityProtection,
    AirQuality,
    NitrateDirective,
    PhosphorusManagement,
    WaterUsage,
    GroundwaterProtection,
}

/// Environmental signal family a regulation is judged against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegulationTheme {
    Water,
    Biodiversity,
    Air,
    Other,
}

impl RegulationType {
    pub fn theme(self) -> RegulationTheme {
        match self {
            Self::WaterProtection
            | Self::NitrateDirective
            | Self::PhosphorusManagement
            | Self::WaterUsage
            | Self::GroundwaterProtection => RegulationTheme::Water,
            Self::BiodiversityProtection => RegulationTheme::Biodiversity,
            Self::AirQuality => RegulationTheme::Air,
            Self::ZntCompliance => RegulationTheme::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    PartiallyCompliant,
    NonCompliant,
    Unknown,
}

impl ComplianceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Compliant => "conforme",
            Self::PartiallyCompliant => "partiellement conforme",
            Self::NonCompliant => "non conforme",
            Self::Unknown => "indéterminé",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferType {
    Aquatic,
    Arthropod,
    Plant,
}

impl BufferType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Aquatic => "milieu aquatique",
            Self::Arthropod => "arthropodes non cibles",
            Self::Plant => "plantes non cibles",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulationSource {
    Catalog,
    ProductRegistry,
}

/// Buffer-zone (ZNT) requirement for one buffer type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZntRequirement {
    pub water_body_category: WaterBodyCategory,
    pub required_distance_m: f64,
    /// Present only when a reduction was actually computed.
    pub reduced_distance_m: Option<f64>,
    pub reduction_possible: bool,
    pub equipment_class_required: Option<DriftReductionClass>,
    pub applied_reduction_pct: f64,
    pub max_reduction_pct: f64,
    pub min_absolute_distance_m: f64,
    pub conditions: Vec<String>,
    /// `None` until judged against a measured distance.
    pub is_compliant: Option<bool>,
}

impl ZntRequirement {
    pub fn effective_distance_m(&self) -> f64 {
        self.reduced_distance_m.unwrap_or(self.required_distance_m)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegulationRecord {
    pub regulation_type: RegulationType,
    pub name: String,
    pub compliance_status: ComplianceStatus,
    pub impact_level: ImpactLevel,
    pub required_measures: Vec<String>,
    pub restrictions: Vec<String>,
    pub penalties: Vec<String>,
    pub legal_references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub znt_requirements: Option<BTreeMap<BufferType, ZntRequirement>>,
    pub source: RegulationSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
}

impl RegulationRecord {
    pub fn is_non_compliant(&self) -> bool {
        self.compliance_status == ComplianceStatus::NonCompliant
    }
}
