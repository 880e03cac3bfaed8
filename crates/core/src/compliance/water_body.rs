use crate::domain::water::{WaterBodyCategory, WaterBodyDescriptor};

/// Fixed attributes of a water body category.
#[derive(Debug, PartialEq)]
pub struct WaterBodyProfile {
    pub category: WaterBodyCategory,
    pub label: &'static str,
    pub base_buffer_m: f64,
    pub reduction_allowed: bool,
    pub min_absolute_distance_m: f64,
    pub special_protections: &'static [&'static str],
    pub is_drinking_water_source: bool,
    pub is_fish_bearing: bool,
}

impl WaterBodyProfile {
    pub fn to_descriptor(&self) -> WaterBodyDescriptor {
        WaterBodyDescriptor {
            category: self.category,
            label: self.label.to_string(),
            base_buffer_m: self.base_buffer_m,
            reduction_allowed: self.reduction_allowed,
            min_absolute_distance_m: self.min_absolute_distance_m,
            special_protections: self
                .special_protections
                .iter()
                .map(|protection| (*protection).to_string())
                .collect(),
            is_drinking_water_source: self.is_drinking_water_source,
            is_fish_bearing: self.is_fish_bearing,
        }
    }
}

/// Minimum buffer forced around drinking-water abstraction points.
pub const DRINKING_WATER_MIN_BUFFER_M: f64 = 200.0;

static WATER_BODY_TABLE: [WaterBodyProfile; 7] = [
    WaterBodyProfile {
        category: WaterBodyCategory::DrinkingWaterSource,
        label: "Captage d'eau potable",
        base_buffer_m: DRINKING_WATER_MIN_BUFFER_M,
        reduction_allowed: false,
        min_absolute_distance_m: DRINKING_WATER_MIN_BUFFER_M,
        special_protections: &[
            "Périmètre de protection rapprochée : tout traitement interdit",
            "Déclaration d'utilité publique du captage à consulter",
            "Stockage et préparation des produits interdits dans le périmètre",
        ],
        is_drinking_water_source: true,
        is_fish_bearing: false,
    },
    WaterBodyProfile {
        category: WaterBodyCategory::PermanentStream,
        label: "Cours d'eau permanent",
        base_buffer_m: 5.0,
        reduction_allowed: true,
        min_absolute_distance_m: 5.0,
        special_protections: &[
            "Bande enherbée BCAE de 5 m obligatoire",
            "Protection de la faune piscicole",
        ],
        is_drinking_water_source: false,
        is_fish_bearing: true,
    },
    WaterBodyProfile {
        category: WaterBodyCategory::IntermittentStream,
        label: "Cours d'eau intermittent",
        base_buffer_m: 5.0,
        reduction_allowed: true,
        min_absolute_distance_m: 5.0,
        special_protections: &["ZNT applicable même en période d'assec"],
        is_drinking_water_source: false,
        is_fish_bearing: false,
    },
    WaterBodyProfile {
        category: WaterBodyCategory::DrainageDitch,
        label: "Fossé de drainage",
        base_buffer_m: 1.0,
        reduction_allowed: true,
        min_absolute_distance_m: 1.0,
        special_protections: &["Aucun traitement direct dans le fossé ni sur ses berges"],
        is_drinking_water_source: false,
        is_fish_bearing: false,
    },
    WaterBodyProfile {
        category: WaterBodyCategory::LakePond,
        label: "Plan d'eau",
        base_buffer_m: 5.0,
        reduction_allowed: true,
        min_absolute_distance_m: 5.0,
        special_protections: &[
            "Protection de la faune piscicole",
            "Interdiction de rinçage du matériel à proximité",
        ],
        is_drinking_water_source: false,
        is_fish_bearing: true,
    },
    WaterBodyProfile {
        category: WaterBodyCategory::Wetland,
        label: "Zone humide",
        base_buffer_m: 10.0,
        reduction_allowed: true,
        min_absolute_distance_m: 5.0,
        special_protections: &[
            "Préservation des habitats humides",
            "Drainage et remblaiement soumis à déclaration",
        ],
        is_drinking_water_source: false,
        is_fish_bearing: false,
    },
    WaterBodyProfile {
        category: WaterBodyCategory::Unknown,
        label: "Point d'eau non caractérisé",
        base_buffer_m: 5.0,
        reduction_allowed: true,
        min_absolute_distance_m: 5.0,
        special_protections: &["Appliquer la ZNT minimale de 5 m par défaut"],
        is_drinking_water_source: false,
        is_fish_bearing: false,
    },
];

/// Looks up the fixed profile of a water body category; `None` reads as
/// `Unknown`.
pub fn classify(category: Option<WaterBodyCategory>) -> &'static WaterBodyProfile {
    let category = category.unwrap_or_default();
    WATER_BODY_TABLE
        .iter()
        .find(|profile| profile.category == category)
        .unwrap_or(&WATER_BODY_TABLE[WATER_BODY_TABLE.len() - 1])
}
