//! Recommendations and critical warnings derived from an evaluated request.
//!
//! Every rule is independent and either contributes one line or nothing.
//! Output order follows rule order, highest severity first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compliance::assessor::ProductContribution;
use crate::compliance::znt::MAX_REDUCTION_PCT;
use crate::domain::conditions::{DriftReductionClass, EnvironmentalConditions};
use crate::domain::practice::PracticeType;
use crate::domain::regulation::{
    BufferType, ComplianceStatus, RegulationRecord, RegulationType, ZntRequirement,
};
use crate::domain::risk::{RiskAssessment, RiskLevel};
use crate::domain::water::WaterBodyCategory;

pub const HIGH_TEMPERATURE_C: f64 = 25.0;
pub const LOW_TEMPERATURE_C: f64 = 10.0;
pub const LOW_HUMIDITY_PCT: f64 = 30.0;
pub const LARGE_IRRIGATED_FIELD_HA: f64 = 10.0;

pub struct AdvisoryInput<'a> {
    pub practice: &'a PracticeType,
    pub regulations: &'a [RegulationRecord],
    pub risk: &'a RiskAssessment,
    pub conditions: &'a EnvironmentalConditions,
    pub znt_requirements: &'a BTreeMap<BufferType, ZntRequirement>,
    pub products: &'a [ProductContribution],
    pub field_size_ha: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub recommendations: Vec<String>,
    pub critical_warnings: Vec<String>,
}

pub fn generate(input: &AdvisoryInput<'_>) -> Advisory {
    Advisory { critical_warnings: critical_warnings(input), recommendations: recommendations(input) }
}

fn critical_warnings(input: &AdvisoryInput<'_>) -> Vec<String> {
    let conditions = input.conditions;
    let mut warnings = Vec::new();

    if conditions.temperature_inversion == Some(true) {
        warnings.push(
            "Inversion de température en cours : traitement interdit, risque de dérive maximal"
                .to_string(),
        );
    }
    if let Some(distance) = conditions.water_distance_m.filter(|distance| *distance < 5.0) {
        warnings.push(format!(
            "Point d'eau à {distance} m (moins de 5 m) : traitement interdit"
        ));
    }
    if let Some(wind) = conditions.wind_speed_kmh.filter(|wind| *wind > 19.0) {
        warnings.push(format!("Vent à {wind} km/h (plus de 19 km/h) : traitement interdit"));
    }
    if conditions.water_body_category == Some(WaterBodyCategory::DrinkingWaterSource) {
        warnings.push(
            "Captage d'eau potable à proximité : aucune réduction de ZNT n'est admise, distance minimale de 200 m"
                .to_string(),
        );
    }
    if let Some(temperature) = conditions.temperature_c {
        if temperature > HIGH_TEMPERATURE_C {
            warnings.push(format!(
                "Attention : température de {temperature} °C (plus de 25 °C), efficacité réduite et volatilisation accrue"
            ));
        } else if temperature < LOW_TEMPERATURE_C {
            warnings.push(format!(
                "Attention : température de {temperature} °C (moins de 10 °C), efficacité du traitement réduite"
            ));
        }
    }
    if let Some(humidity) = conditions.humidity_pct.filter(|humidity| *humidity < LOW_HUMIDITY_PCT)
    {
        warnings.push(format!(
            "Attention : hygrométrie de {humidity} % (moins de 30 %), risque de dérive accru"
        ));
    }

    if let Some(warning) = product_buffer_discrepancy(input.regulations) {
        warnings.push(warning);
    }

    for product in input.products {
        let Some(hazard) = &product.hazard else {
            continue;
        };
        if hazard.is_cmr {
            warnings.push(format!(
                "Produit {} classé CMR : équipements de protection individuelle obligatoires, usage interdit à proximité des lieux accueillant des personnes vulnérables",
                product.product_id
            ));
        }
        if hazard.bee_toxicity.is_high() && conditions.pollinator_flowering == Some(true) {
            warnings.push(format!(
                "Produit {} toxique pour les abeilles pendant une floraison active : application interdite hors mention abeilles",
                product.product_id
            ));
        }
    }

    if input.risk.non_compliant_count >= 2 {
        warnings.push(format!(
            "{} non-conformités relevées : risque de sanctions pénales et de réduction des aides PAC",
            input.risk.non_compliant_count
        ));
    }

    warnings
}

/// Product buffers and the generic 5 m / 20 m water thresholds are judged
/// independently; flag the case where only the product buffer fails.
fn product_buffer_discrepancy(regulations: &[RegulationRecord]) -> Option<String> {
    let generic_water_ok = regulations.iter().any(|r| {
        r.regulation_type == RegulationType::WaterProtection
            && matches!(
                r.compliance_status,
                ComplianceStatus::Compliant | ComplianceStatus::PartiallyCompliant
            )
    });
    let failing_product = regulations
        .iter()
        .find(|r| r.regulation_type == RegulationType::ZntCompliance && r.is_non_compliant())?;

    generic_water_ok.then(|| {
        format!(
            "{} : la ZNT du produit est plus stricte que le seuil générique de protection des points d'eau, elle prévaut",
            failing_product.name
        )
    })
}

fn recommendations(input: &AdvisoryInput<'_>) -> Vec<String> {
    let conditions = input.conditions;
    let mut lines = Vec::new();

    for regulation in input.regulations {
        if !matches!(
            regulation.compliance_status,
            ComplianceStatus::NonCompliant | ComplianceStatus::PartiallyCompliant
        ) {
            continue;
        }
        if let Some(measure) = regulation.required_measures.first() {
            lines.push(format!("{} : {}", regulation.name, measure));
        }
    }

    if let Some(wind) = conditions.wind_speed_kmh.filter(|wind| *wind > 15.0 && *wind <= 19.0) {
        lines.push(format!(
            "Vent à {wind} km/h, proche de la limite de 19 km/h : utiliser des buses anti-dérive"
        ));
    }
    if conditions.rain_forecast_48h == Some(true) {
        lines.push(
            "Pluie annoncée sous 48 h : risque de lessivage et de ruissellement, reporter l'application"
                .to_string(),
        );
    }
    if conditions.pollinator_flowering == Some(true) {
        lines.push(
            "Floraison en cours : intervenir autour du coucher du soleil, hors présence d'abeilles"
                .to_string(),
        );
    }

    let reducible_aquatic = input
        .znt_requirements
        .get(&BufferType::Aquatic)
        .is_some_and(|requirement| requirement.reduction_possible);
    if reducible_aquatic && conditions.drift_class() == DriftReductionClass::None {
        lines.push(format!(
            "Un matériel anti-dérive homologué associé à un dispositif végétalisé permet de réduire la ZNT aquatique jusqu'à {MAX_REDUCTION_PCT} %"
        ));
    }

    if matches!(input.practice, PracticeType::Irrigation)
        && input.field_size_ha.is_some_and(|size| size > LARGE_IRRIGATED_FIELD_HA)
    {
        lines.push(
            "Surface irriguée supérieure à 10 ha : tenir un registre des volumes prélevés".to_string(),
        );
    }

    if conditions.in_sensitive_area() {
        lines.push(
            "Zone sensible : consulter la DDT et le document d'objectifs du site avant intervention"
                .to_string(),
        );
    }
    if matches!(input.risk.risk_level, RiskLevel::High | RiskLevel::Critical) {
        lines.push(
            "Risque élevé : faire valider l'intervention par un conseiller agréé avant de traiter"
                .to_string(),
        );
    }

    lines
}
