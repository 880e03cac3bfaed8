use serde::{Deserialize, Serialize};

use crate::domain::water::WaterBodyCategory;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl ImpactLevel {
    pub fn is_high_or_critical(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// Drift-reduction certification of the spraying equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftReductionClass {
    #[default]
    None,
    #[serde(alias = "1-star", alias = "1_star")]
    OneStar,
    #[serde(alias = "3-star", alias = "3_star")]
    ThreeStar,
    #[serde(alias = "5-star", alias = "5_star")]
    FiveStar,
}

impl DriftReductionClass {
    pub const ALL: [Self; 4] = [Self::None, Self::OneStar, Self::ThreeStar, Self::FiveStar];

    /// Percentage points of buffer reduction granted by the equipment alone.
    pub fn reduction_pct(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::OneStar => 25.0,
            Self::ThreeStar => 33.0,
            Self::FiveStar => 50.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "aucun",
            Self::OneStar => "1 étoile",
            Self::ThreeStar => "3 étoiles",
            Self::FiveStar => "5 étoiles",
        }
    }
}

impl std::str::FromStr for DriftReductionClass {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" | "" => Ok(Self::None),
            "1_star" | "one_star" => Ok(Self::OneStar),
            "3_star" | "three_star" => Ok(Self::ThreeStar),
            "5_star" | "five_star" => Ok(Self::FiveStar),
            other => Err(DomainError::InvalidConditions {
                field: "drift_reduction_class",
                reason: format!("unsupported class `{other}` (expected none|1-star|3-star|5-star)"),
            }),
        }
    }
}

/// Site and weather snapshot supplied with an assessment request.
///
/// Every field is optional. A missing field means the matching criterion is
/// not assessed; it is never read as "compliant".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentalConditions {
    #[serde(alias = "water_proximity_m")]
    pub water_distance_m: Option<f64>,
    pub water_body_category: Option<WaterBodyCategory>,
    pub water_body_width_m: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub temperature_inversion: Option<bool>,
    pub pollinator_flowering: Option<bool>,
    pub sensitive_area: Option<bool>,
    pub rain_forecast_48h: Option<bool>,
    pub drift_reduction_class: Option<DriftReductionClass>,
    pub vegetation_buffer: Option<bool>,
    pub impact_level: Option<ImpactLevel>,
}

impl EnvironmentalConditions {
    pub fn validate(&self) -> Result<(), DomainError> {
        non_negative("water_distance_m", self.water_distance_m)?;
        non_negative("water_body_width_m", self.water_body_width_m)?;
        non_negative("wind_speed_kmh", self.wind_speed_kmh)?;
        finite("temperature_c", self.temperature_c)?;

        if let Some(humidity) = self.humidity_pct {
            if !humidity.is_finite() || !(0.0..=100.0).contains(&humidity) {
                return Err(DomainError::InvalidConditions {
                    field: "humidity_pct",
                    reason: format!("must be within 0..=100, got {humidity}"),
                });
            }
        }

        Ok(())
    }

    pub fn in_sensitive_area(&self) -> bool {
        self.sensitive_area.unwrap_or(false)
    }

    pub fn drift_class(&self) -> DriftReductionClass {
        self.drift_reduction_class.unwrap_or_default()
    }

    pub fn has_vegetation_buffer(&self) -> bool {
        self.vegetation_buffer.unwrap_or(false)
    }
}

fn finite(field: &'static str, value: Option<f64>) -> Result<(), DomainError> {
    match value {
        Some(value) if !value.is_finite() => Err(DomainError::InvalidConditions {
            field,
            reason: "must be a finite number".to_string(),
        }),
        _ => Ok(()),
    }
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<(), DomainError> {
    finite(field, value)?;
    match value {
        Some(value) if value < 0.0 => Err(DomainError::InvalidConditions {
            field,
            reason: format!("must not be negative, got {value}"),
        }),
        _ => Ok(()),
    }
}
