//! Buffer-zone (ZNT) reduction calculator.
//!
//! Computes the requirement only. Whether a plot complies is decided later
//! against the measured distance, so `is_compliant` is always left as `None`.

use tracing::debug;

use crate::compliance::water_body::{classify, DRINKING_WATER_MIN_BUFFER_M};
use crate::domain::conditions::DriftReductionClass;
use crate::domain::regulation::ZntRequirement;
use crate::domain::water::WaterBodyCategory;
use crate::errors::DomainError;

/// Cap on the sum of all percentage reductions applied to one buffer.
pub const MAX_REDUCTION_PCT: f64 = 66.0;
pub const VEGETATION_BUFFER_REDUCTION_PCT: f64 = 20.0;
pub const VEGETATION_BUFFER_MIN_WIDTH_M: f64 = 5.0;
pub const DRIFT_WIND_LIMIT_KMH: f64 = 19.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZntInput {
    pub base_distance_m: f64,
    pub drift_class: DriftReductionClass,
    pub vegetation_buffer: bool,
    pub water_body_category: WaterBodyCategory,
}

impl ZntInput {
    pub fn new(base_distance_m: f64, water_body_category: WaterBodyCategory) -> Self {
        Self {
            base_distance_m,
            drift_class: DriftReductionClass::None,
            vegetation_buffer: false,
            water_body_category,
        }
    }

    pub fn with_drift_class(mut self, drift_class: DriftReductionClass) -> Self {
        self.drift_class = drift_class;
        self
    }

    pub fn with_vegetation_buffer(mut self, vegetation_buffer: bool) -> Self {
        self.vegetation_buffer = vegetation_buffer;
        self
    }
}

/// Reduction percentage granted by equipment and vegetation, capped.
pub fn reduction_pct(drift_class: DriftReductionClass, vegetation_buffer: bool) -> f64 {
    let vegetation = if vegetation_buffer { VEGETATION_BUFFER_REDUCTION_PCT } else { 0.0 };
    (drift_class.reduction_pct() + vegetation).min(MAX_REDUCTION_PCT)
}

pub fn calculate(input: &ZntInput) -> Result<ZntRequirement, DomainError> {
    let base = input.base_distance_m;
    if !base.is_finite() || base <= 0.0 {
        return Err(DomainError::InvalidBufferDistance(base));
    }

    let profile = classify(Some(input.water_body_category));

    if profile.is_drinking_water_source {
        return Ok(ZntRequirement {
            water_body_category: input.water_body_category,
            required_distance_m: base.max(DRINKING_WATER_MIN_BUFFER_M),
            reduced_distance_m: None,
            reduction_possible: false,
            equipment_class_required: None,
            applied_reduction_pct: 0.0,
            max_reduction_pct: 0.0,
            min_absolute_distance_m: profile.min_absolute_distance_m,
            conditions: Vec::new(),
            is_compliant: None,
        });
    }

    let pct = if profile.reduction_allowed {
        reduction_pct(input.drift_class, input.vegetation_buffer)
    } else {
        0.0
    };
    // The floor never lifts a requirement above its own base.
    let floor = profile.min_absolute_distance_m.min(base);

    let mut reduced_distance_m = None;
    let mut conditions = Vec::new();

    if pct > 0.0 {
        let computed = round_cm(base * (1.0 - pct / 100.0));
        let reduced = computed.max(floor).min(base);
        if computed < floor {
            debug!(
                event_name = "compliance.znt.floor_applied",
                category = input.water_body_category.as_str(),
                base_distance_m = base,
                computed_distance_m = computed,
                floor_m = floor,
                "reduced buffer clamped to category floor"
            );
        }
        reduced_distance_m = Some(reduced);
        conditions = reduction_conditions(input.drift_class, floor);
    }

    Ok(ZntRequirement {
        water_body_category: input.water_body_category,
        required_distance_m: base,
        reduced_distance_m,
        reduction_possible: profile.reduction_allowed,
        equipment_class_required: (input.drift_class != DriftReductionClass::None)
            .then_some(input.drift_class),
        applied_reduction_pct: pct,
        max_reduction_pct: if profile.reduction_allowed { MAX_REDUCTION_PCT } else { 0.0 },
        min_absolute_distance_m: profile.min_absolute_distance_m,
        conditions,
        is_compliant: None,
    })
}

fn reduction_conditions(drift_class: DriftReductionClass, floor_m: f64) -> Vec<String> {
    let equipment = match drift_class {
        DriftReductionClass::None => {
            "Matériel de pulvérisation soumis au contrôle technique obligatoire".to_string()
        }
        class => format!(
            "Matériel anti-dérive classé {} inscrit au Bulletin officiel du ministère",
            class.label()
        ),
    };

    vec![
        equipment,
        format!(
            "Dispositif végétalisé permanent d'au moins {VEGETATION_BUFFER_MIN_WIDTH_M} m de large en bordure du point d'eau"
        ),
        format!("Vitesse du vent inférieure à {DRIFT_WIND_LIMIT_KMH} km/h pendant l'application"),
        format!("Distance minimale absolue de {floor_m} m toujours respectée"),
    ]
}

fn round_cm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
