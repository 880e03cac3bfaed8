//! Compliance assessor: turns catalog entries and registry figures into
//! evaluated regulation records.
//!
//! Catalog statuses are derived by a fixed pipeline, evaluated in this order:
//!
//! 1. [`STATUS_RULES`], first rule returning a status wins;
//! 2. fallback on the coarse `impact_level` of the conditions;
//! 3. sensitive-area downgrade of a `Compliant` outcome to `PartiallyCompliant`.
//!
//! Without any signal the status is `Unknown`.

use std::collections::BTreeMap;

use crate::compliance::catalog::{regulations_for, CatalogRegulation};
use crate::compliance::znt::{calculate, ZntInput};
use crate::domain::conditions::{EnvironmentalConditions, ImpactLevel};
use crate::domain::practice::PracticeType;
use crate::domain::product::{BufferRequirements, HazardData, ProductId};
use crate::domain::regulation::{
    BufferType, ComplianceStatus, RegulationRecord, RegulationSource, RegulationTheme,
    RegulationType, ZntRequirement,
};
use crate::domain::water::WaterBodyCategory;
use crate::errors::DomainError;

pub const WATER_DISTANCE_PROHIBITED_M: f64 = 5.0;
pub const WATER_DISTANCE_CAUTION_M: f64 = 20.0;
pub const WIND_PROHIBITED_KMH: f64 = 19.0;
pub const WIND_CAUTION_KMH: f64 = 15.0;

/// One step of the catalog status chain.
pub struct StatusRule {
    pub name: &'static str,
    pub evaluate: fn(RegulationTheme, &EnvironmentalConditions) -> Option<ComplianceStatus>,
}

pub const STATUS_RULES: [StatusRule; 3] = [
    StatusRule { name: "water_proximity", evaluate: water_proximity },
    StatusRule { name: "pollinator_flowering", evaluate: pollinator_flowering },
    StatusRule { name: "wind_speed", evaluate: wind_speed },
];

fn water_proximity(
    theme: RegulationTheme,
    conditions: &EnvironmentalConditions,
) -> Option<ComplianceStatus> {
    if theme != RegulationTheme::Water {
        return None;
    }
    let distance = conditions.water_distance_m?;
    Some(if distance < WATER_DISTANCE_PROHIBITED_M {
        ComplianceStatus::NonCompliant
    } else if distance < WATER_DISTANCE_CAUTION_M {
        ComplianceStatus::PartiallyCompliant
    } else {
        ComplianceStatus::Compliant
    })
}

fn pollinator_flowering(
    theme: RegulationTheme,
    conditions: &EnvironmentalConditions,
) -> Option<ComplianceStatus> {
    if theme != RegulationTheme::Biodiversity {
        return None;
    }
    conditions.pollinator_flowering.map(|flowering| {
        if flowering {
            ComplianceStatus::NonCompliant
        } else {
            ComplianceStatus::Compliant
        }
    })
}

fn wind_speed(
    theme: RegulationTheme,
    conditions: &EnvironmentalConditions,
) -> Option<ComplianceStatus> {
    if theme != RegulationTheme::Air {
        return None;
    }
    let wind = conditions.wind_speed_kmh?;
    Some(if wind > WIND_PROHIBITED_KMH {
        ComplianceStatus::NonCompliant
    } else if wind > WIND_CAUTION_KMH {
        ComplianceStatus::PartiallyCompliant
    } else {
        ComplianceStatus::Compliant
    })
}

fn status_from_impact(level: ImpactLevel) -> ComplianceStatus {
    match level {
        ImpactLevel::Low => ComplianceStatus::Compliant,
        ImpactLevel::Moderate => ComplianceStatus::PartiallyCompliant,
        ImpactLevel::High | ImpactLevel::Critical => ComplianceStatus::NonCompliant,
    }
}

pub fn catalog_status(
    regulation_type: RegulationType,
    conditions: &EnvironmentalConditions,
) -> ComplianceStatus {
    let theme = regulation_type.theme();
    let status = STATUS_RULES
        .iter()
        .find_map(|rule| (rule.evaluate)(theme, conditions))
        .or_else(|| conditions.impact_level.map(status_from_impact));

    match status {
        Some(ComplianceStatus::Compliant) if conditions.in_sensitive_area() => {
            ComplianceStatus::PartiallyCompliant
        }
        Some(status) => status,
        None => ComplianceStatus::Unknown,
    }
}

/// Registry figures gathered for one product.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductContribution {
    pub product_id: ProductId,
    pub buffers: BufferRequirements,
    pub hazard: Option<HazardData>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplianceAssessment {
    pub regulations: Vec<RegulationRecord>,
    /// Most restrictive requirement per buffer type across all products.
    pub znt_requirements: BTreeMap<BufferType, ZntRequirement>,
    pub catalog_count: usize,
    pub registry_count: usize,
}

pub fn assess_regulations(
    practice: &PracticeType,
    conditions: &EnvironmentalConditions,
    contributions: &[ProductContribution],
) -> Result<ComplianceAssessment, DomainError> {
    let mut assessment = ComplianceAssessment::default();

    for regulation in regulations_for(practice) {
        assessment.regulations.push(evaluate_catalog(regulation, conditions));
        assessment.catalog_count += 1;
    }

    for contribution in contributions {
        let Some(record) = product_record(contribution, conditions)? else {
            continue;
        };

        for (buffer, requirement) in record.znt_requirements.iter().flatten() {
            let stricter = assessment.znt_requirements.get(buffer).map_or(true, |current| {
                requirement.effective_distance_m() > current.effective_distance_m()
            });
            if stricter {
                assessment.znt_requirements.insert(*buffer, requirement.clone());
            }
        }

        assessment.regulations.push(record);
        assessment.registry_count += 1;
    }

    Ok(assessment)
}

fn evaluate_catalog(
    regulation: &CatalogRegulation,
    conditions: &EnvironmentalConditions,
) -> RegulationRecord {
    regulation.to_record(catalog_status(regulation.regulation_type, conditions))
}

/// Judges a computed requirement against the measured water distance.
/// Only the aquatic buffer relates to the measured figure.
pub fn judge_requirement(
    buffer: BufferType,
    mut requirement: ZntRequirement,
    conditions: &EnvironmentalConditions,
) -> ZntRequirement {
    requirement.is_compliant = match buffer {
        BufferType::Aquatic => conditions
            .water_distance_m
            .map(|distance| distance >= requirement.effective_distance_m()),
        BufferType::Arthropod | BufferType::Plant => None,
    };
    requirement
}

fn aggregate_status(requirements: &BTreeMap<BufferType, ZntRequirement>) -> ComplianceStatus {
    let verdicts: Vec<bool> = requirements.values().filter_map(|r| r.is_compliant).collect();
    if verdicts.is_empty() {
        ComplianceStatus::Unknown
    } else if verdicts.iter().any(|compliant| !compliant) {
        ComplianceStatus::NonCompliant
    } else {
        ComplianceStatus::Compliant
    }
}

pub fn product_record(
    contribution: &ProductContribution,
    conditions: &EnvironmentalConditions,
) -> Result<Option<RegulationRecord>, DomainError> {
    let figures = contribution.buffers.figures();
    if figures.is_empty() {
        return Ok(None);
    }

    let mut requirements = BTreeMap::new();
    for (buffer, base) in figures {
        let category = match buffer {
            BufferType::Aquatic => conditions.water_body_category.unwrap_or_default(),
            BufferType::Arthropod | BufferType::Plant => WaterBodyCategory::Unknown,
        };
        let requirement = calculate(
            &ZntInput::new(base, category)
                .with_drift_class(conditions.drift_class())
                .with_vegetation_buffer(conditions.has_vegetation_buffer()),
        )?;
        requirements.insert(buffer, judge_requirement(buffer, requirement, conditions));
    }

    let mut required_measures: Vec<String> = requirements
        .iter()
        .map(|(buffer, requirement)| {
            format!(
                "Respecter une ZNT {} de {} m",
                buffer.label(),
                requirement.effective_distance_m()
            )
        })
        .collect();
    let restrictions = requirements
        .iter()
        .map(|(buffer, requirement)| match requirement.reduced_distance_m {
            Some(reduced) => format!(
                "Traitement interdit à moins de {} m ({}), réductible à {} m sous conditions",
                requirement.required_distance_m,
                buffer.label(),
                reduced
            ),
            None => format!(
                "Traitement interdit à moins de {} m ({})",
                requirement.required_distance_m,
                buffer.label()
            ),
        })
        .collect();

    let impact_level = match &contribution.hazard {
        Some(hazard) => {
            if !hazard.substances.is_empty() {
                required_measures
                    .push(format!("Substances actives : {}", hazard.substances.join(", ")));
            }
            hazard.aquatic_toxicity_level.impact_level()
        }
        None => ImpactLevel::High,
    };

    Ok(Some(RegulationRecord {
        regulation_type: RegulationType::ZntCompliance,
        name: format!("Zones non traitées du produit {}", contribution.product_id),
        compliance_status: aggregate_status(&requirements),
        impact_level,
        required_measures,
        restrictions,
        penalties: vec![
            "Amende jusqu'à 150 000 € et 6 mois d'emprisonnement (Code rural, article L.253-17)"
                .to_string(),
        ],
        legal_references: vec![
            "Arrêté du 4 mai 2017, articles 12 et 14".to_string(),
            format!("Autorisation de mise sur le marché n° {}", contribution.product_id),
        ],
        znt_requirements: Some(requirements),
        source: RegulationSource::ProductRegistry,
        product_id: Some(contribution.product_id.clone()),
    }))
}

#[cfg(test)]
mod tests {
    use super::{
        assess_regulations, catalog_status, product_record, ProductContribution, STATUS_RULES,
    };
    use crate::domain::conditions::{DriftReductionClass, EnvironmentalConditions, ImpactLevel};
    use crate::domain::practice::PracticeType;
    use crate::domain::product::{BufferRequirements, HazardData, ProductId, ToxicityLevel};
    use crate::domain::regulation::{
        BufferType, ComplianceStatus, RegulationSource, RegulationType,
    };
    use crate::domain::water::WaterBodyCategory;

    fn conditions() -> EnvironmentalConditions {
        EnvironmentalConditions::default()
    }

    fn contribution(id: &str, aquatic_m: f64) -> ProductContribution {
        ProductContribution {
            product_id: ProductId(id.to_string()),
            buffers: BufferRequirements { aquatic_m: Some(aquatic_m), ..Default::default() },
            hazard: None,
        }
    }

    #[test]
    fn rule_order_is_water_then_flowering_then_wind() {
        let names: Vec<_> = STATUS_RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(names, vec!["water_proximity", "pollinator_flowering", "wind_speed"]);
    }

    #[test]
    fn water_thresholds_drive_water_themed_regulations() {
        let at = |distance: f64| EnvironmentalConditions {
            water_distance_m: Some(distance),
            ..conditions()
        };

        assert_eq!(
            catalog_status(RegulationType::WaterProtection, &at(3.0)),
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::NitrateDirective, &at(10.0)),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::GroundwaterProtection, &at(20.0)),
            ComplianceStatus::Compliant
        );
        assert_eq!(
            catalog_status(RegulationType::AirQuality, &at(3.0)),
            ComplianceStatus::Unknown
        );
    }

    #[test]
    fn water_usage_is_judged_on_water_distance() {
        let at = |distance: f64| EnvironmentalConditions {
            water_distance_m: Some(distance),
            ..conditions()
        };

        assert_eq!(
            catalog_status(RegulationType::WaterUsage, &at(2.0)),
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::WaterUsage, &at(10.0)),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::WaterUsage, &at(25.0)),
            ComplianceStatus::Compliant
        );
    }

    #[test]
    fn flowering_and_wind_drive_their_themes() {
        let flowering =
            EnvironmentalConditions { pollinator_flowering: Some(true), ..conditions() };
        assert_eq!(
            catalog_status(RegulationType::BiodiversityProtection, &flowering),
            ComplianceStatus::NonCompliant
        );

        let windy = |wind: f64| EnvironmentalConditions { wind_speed_kmh: Some(wind), ..conditions() };
        assert_eq!(
            catalog_status(RegulationType::AirQuality, &windy(25.0)),
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::AirQuality, &windy(17.0)),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::AirQuality, &windy(19.0)),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::AirQuality, &windy(10.0)),
            ComplianceStatus::Compliant
        );
    }

    #[test]
    fn sensitive_area_downgrades_compliant_only() {
        let calm_sensitive = EnvironmentalConditions {
            wind_speed_kmh: Some(5.0),
            water_distance_m: Some(2.0),
            sensitive_area: Some(true),
            ..conditions()
        };

        assert_eq!(
            catalog_status(RegulationType::AirQuality, &calm_sensitive),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::WaterProtection, &calm_sensitive),
            ComplianceStatus::NonCompliant
        );
    }

    #[test]
    fn impact_level_is_the_fallback_and_unknown_the_last_resort() {
        let coarse = |level| EnvironmentalConditions { impact_level: Some(level), ..conditions() };

        assert_eq!(
            catalog_status(RegulationType::WaterUsage, &coarse(ImpactLevel::Low)),
            ComplianceStatus::Compliant
        );
        assert_eq!(
            catalog_status(RegulationType::WaterUsage, &coarse(ImpactLevel::Moderate)),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::WaterUsage, &coarse(ImpactLevel::Critical)),
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            catalog_status(RegulationType::WaterUsage, &conditions()),
            ComplianceStatus::Unknown
        );

        let sensitive_only = EnvironmentalConditions { sensitive_area: Some(true), ..conditions() };
        assert_eq!(
            catalog_status(RegulationType::WaterProtection, &sensitive_only),
            ComplianceStatus::Unknown
        );
    }

    #[test]
    fn product_record_judges_reduced_aquatic_buffer_against_measured_distance() {
        let base = EnvironmentalConditions {
            water_body_category: Some(WaterBodyCategory::PermanentStream),
            drift_reduction_class: Some(DriftReductionClass::FiveStar),
            vegetation_buffer: Some(true),
            ..conditions()
        };

        for (distance, expected) in [(5.0, true), (6.0, true), (4.9, false)] {
            let conditions = EnvironmentalConditions { water_distance_m: Some(distance), ..base.clone() };
            let record = product_record(&contribution("2000123", 5.0), &conditions)
                .expect("valid figures")
                .expect("record for non-zero buffer");
            let aquatic = &record.znt_requirements.as_ref().expect("znt map")[&BufferType::Aquatic];

            assert_eq!(aquatic.reduced_distance_m, Some(5.0));
            assert_eq!(aquatic.is_compliant, Some(expected));
            assert_eq!(
                record.compliance_status,
                if expected { ComplianceStatus::Compliant } else { ComplianceStatus::NonCompliant }
            );
        }
    }

    #[test]
    fn product_record_without_measured_distance_is_unknown() {
        let record = product_record(&contribution("2000123", 20.0), &conditions())
            .expect("valid figures")
            .expect("record for non-zero buffer");

        assert_eq!(record.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(record.source, RegulationSource::ProductRegistry);
        assert_eq!(record.impact_level, ImpactLevel::High);
    }

    #[test]
    fn drinking_water_placeholder_is_overridden_by_the_measured_distance() {
        let conditions = EnvironmentalConditions {
            water_body_category: Some(WaterBodyCategory::DrinkingWaterSource),
            water_distance_m: Some(150.0),
            ..conditions()
        };
        let record = product_record(&contribution("2000123", 5.0), &conditions)
            .expect("valid figures")
            .expect("record for non-zero buffer");
        let aquatic = &record.znt_requirements.as_ref().expect("znt map")[&BufferType::Aquatic];

        assert_eq!(aquatic.required_distance_m, 200.0);
        assert_eq!(aquatic.is_compliant, Some(false));
        assert_eq!(record.compliance_status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn any_non_compliant_buffer_makes_the_record_non_compliant() {
        let contribution = ProductContribution {
            product_id: ProductId("2000456".to_string()),
            buffers: BufferRequirements {
                aquatic_m: Some(50.0),
                arthropod_m: Some(5.0),
                plant_m: Some(0.0),
            },
            hazard: Some(HazardData {
                substances: vec!["glyphosate".to_string()],
                aquatic_toxicity_level: ToxicityLevel::VeryHigh,
                ..HazardData::default()
            }),
        };
        let conditions = EnvironmentalConditions { water_distance_m: Some(30.0), ..conditions() };
        let record = product_record(&contribution, &conditions)
            .expect("valid figures")
            .expect("record for non-zero buffer");
        let requirements = record.znt_requirements.as_ref().expect("znt map");

        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[&BufferType::Arthropod].is_compliant, None);
        assert_eq!(record.compliance_status, ComplianceStatus::NonCompliant);
        assert_eq!(record.impact_level, ImpactLevel::Critical);
        assert!(record.required_measures.iter().any(|m| m.contains("glyphosate")));
    }

    #[test]
    fn products_without_figures_contribute_nothing() {
        let empty = ProductContribution {
            product_id: ProductId("none".to_string()),
            buffers: BufferRequirements::default(),
            hazard: None,
        };
        assert_eq!(product_record(&empty, &conditions()), Ok(None));
    }

    #[test]
    fn assessment_keeps_the_most_restrictive_buffer_per_type() {
        let assessment = assess_regulations(
            &PracticeType::Spraying,
            &conditions(),
            &[contribution("A", 5.0), contribution("B", 50.0), contribution("C", 20.0)],
        )
        .expect("valid figures");

        assert_eq!(assessment.catalog_count, 3);
        assert_eq!(assessment.registry_count, 3);
        assert_eq!(assessment.regulations.len(), 6);
        assert_eq!(
            assessment.znt_requirements[&BufferType::Aquatic].required_distance_m,
            50.0
        );
    }

    #[test]
    fn other_practice_with_no_products_yields_no_regulations() {
        let assessment = assess_regulations(
            &PracticeType::Other("harvest".to_string()),
            &conditions(),
            &[],
        )
        .expect("nothing to compute");

        assert!(assessment.regulations.is_empty());
        assert!(assessment.znt_requirements.is_empty());
    }
}
