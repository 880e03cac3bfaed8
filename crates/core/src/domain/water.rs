use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Category of the water body nearest to the treated plot.
///
/// Deserialization never fails on an unrecognized value: it falls back to
/// `Unknown`, whose profile carries conservative defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterBodyCategory {
    DrinkingWaterSource,
    PermanentStream,
    IntermittentStream,
    DrainageDitch,
    LakePond,
    Wetland,
    #[default]
    Unknown,
}

impl WaterBodyCategory {
    pub const ALL: [Self; 7] = [
        Self::DrinkingWaterSource,
        Self::PermanentStream,
        Self::IntermittentStream,
        Self::DrainageDitch,
        Self::LakePond,
        Self::Wetland,
        Self::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DrinkingWaterSource => "drinking_water_source",
            Self::PermanentStream => "permanent_stream",
            Self::IntermittentStream => "intermittent_stream",
            Self::DrainageDitch => "drainage_ditch",
            Self::LakePond => "lake_pond",
            Self::Wetland => "wetland",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse_lenient(value: &str) -> Self {
        let normalized = value.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "drinking_water_source" | "drinking_water" | "captage" | "captage_eau_potable" => {
                Self::DrinkingWaterSource
            }
            "permanent_stream" | "cours_d_eau_permanent" | "riviere" => Self::PermanentStream,
            "intermittent_stream" | "cours_d_eau_intermittent" => Self::IntermittentStream,
            "drainage_ditch" | "ditch" | "fosse" | "fossé" => Self::DrainageDitch,
            "lake_pond" | "lake" | "pond" | "lac" | "etang" | "étang" => Self::LakePond,
            "wetland" | "zone_humide" => Self::Wetland,
            _ => Self::Unknown,
        }
    }
}

/// Owned view of a water body profile, as returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterBodyDescriptor {
    pub category: WaterBodyCategory,
    pub label: String,
    pub base_buffer_m: f64,
    pub reduction_allowed: bool,
    pub min_absolute_distance_m: f64,
    pub special_protections: Vec<String>,
    pub is_drinking_water_source: bool,
    pub is_fish_bearing: bool,
}

impl fmt::Display for WaterBodyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WaterBodyCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}
