//! Aggregate environmental risk scoring.

use crate::domain::conditions::{EnvironmentalConditions, ImpactLevel};
use crate::domain::regulation::{ComplianceStatus, RegulationRecord};
use crate::domain::risk::{RiskAssessment, RiskLevel};

pub const SENSITIVE_AREA_MULTIPLIER: f64 = 1.3;

/// Weights applied to each evaluated regulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskWeights {
    pub impact_low: f64,
    pub impact_moderate: f64,
    pub impact_high: f64,
    pub impact_critical: f64,
    pub compliant: f64,
    pub partially_compliant: f64,
    pub non_compliant: f64,
    pub unknown: f64,
}

pub const DEFAULT_RISK_WEIGHTS: RiskWeights = RiskWeights {
    impact_low: 0.1,
    impact_moderate: 0.3,
    impact_high: 0.6,
    impact_critical: 1.0,
    compliant: 0.1,
    partially_compliant: 0.5,
    non_compliant: 1.0,
    unknown: 0.3,
};

impl Default for RiskWeights {
    fn default() -> Self {
        DEFAULT_RISK_WEIGHTS
    }
}

impl RiskWeights {
    pub fn impact(&self, level: ImpactLevel) -> f64 {
        match level {
            ImpactLevel::Low => self.impact_low,
            ImpactLevel::Moderate => self.impact_moderate,
            ImpactLevel::High => self.impact_high,
            ImpactLevel::Critical => self.impact_critical,
        }
    }

    pub fn compliance(&self, status: ComplianceStatus) -> f64 {
        match status {
            ComplianceStatus::Compliant => self.compliant,
            ComplianceStatus::PartiallyCompliant => self.partially_compliant,
            ComplianceStatus::NonCompliant => self.non_compliant,
            ComplianceStatus::Unknown => self.unknown,
        }
    }
}

/// Risk level as a pure function of score and non-compliant count.
pub fn risk_level(score: f64, non_compliant_count: usize) -> RiskLevel {
    if score > 0.7 || non_compliant_count >= 2 {
        RiskLevel::Critical
    } else if score > 0.5 || non_compliant_count >= 1 {
        RiskLevel::High
    } else if score > 0.3 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    weights: RiskWeights,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn score(
        &self,
        regulations: &[RegulationRecord],
        conditions: &EnvironmentalConditions,
    ) -> RiskAssessment {
        let mut critical_issues = Vec::new();
        let mut high_impact_count = 0;
        let mut non_compliant_count = 0;
        let mut total = 0.0;

        for regulation in regulations {
            total += self.weights.impact(regulation.impact_level)
                * self.weights.compliance(regulation.compliance_status);

            if regulation.impact_level.is_high_or_critical() {
                high_impact_count += 1;
            }
            if regulation.is_non_compliant() {
                non_compliant_count += 1;
                critical_issues.push(format!("Non-conformité : {}", regulation.name));
            }
        }

        let mut risk_score =
            if regulations.is_empty() { 0.0 } else { total / regulations.len() as f64 };

        if conditions.in_sensitive_area() {
            risk_score = (risk_score * SENSITIVE_AREA_MULTIPLIER).min(1.0);
            critical_issues.push(
                "Parcelle située en zone sensible (Natura 2000 ou zone protégée) : risque majoré"
                    .to_string(),
            );
        }

        let risk_score = risk_score.clamp(0.0, 1.0);

        RiskAssessment {
            risk_level: risk_level(risk_score, non_compliant_count),
            risk_score,
            high_impact_count,
            non_compliant_count,
            critical_issues,
        }
    }
}
