use chrono::{Datelike, NaiveDate};

use crate::domain::conditions::EnvironmentalConditions;
use crate::domain::practice::PracticeType;

/// Inclusive (month, day) window; a window whose start falls after its end
/// wraps over the new year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarWindow {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

impl CalendarWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        let day = (date.month(), date.day());
        if self.start <= self.end {
            self.start <= day && day <= self.end
        } else {
            day >= self.start || day <= self.end
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SeasonalCheck {
    Always,
    WhenFlowering,
}

struct SeasonalRule {
    practice: fn(&PracticeType) -> bool,
    window: CalendarWindow,
    check: SeasonalCheck,
    message: &'static str,
}

fn is_spraying(practice: &PracticeType) -> bool {
    matches!(practice, PracticeType::Spraying)
}

fn is_fertilization(practice: &PracticeType) -> bool {
    matches!(practice, PracticeType::Fertilization)
}

fn is_irrigation(practice: &PracticeType) -> bool {
    matches!(practice, PracticeType::Irrigation)
}

pub const NITRATE_WINTER_BAN: CalendarWindow = CalendarWindow { start: (11, 15), end: (1, 15) };
pub const FLOWERING_SEASON: CalendarWindow = CalendarWindow { start: (4, 1), end: (7, 31) };
pub const LOW_WATER_SEASON: CalendarWindow = CalendarWindow { start: (6, 1), end: (9, 30) };

static SEASONAL_CALENDAR: [SeasonalRule; 4] = [
    SeasonalRule {
        practice: is_fertilization,
        window: NITRATE_WINTER_BAN,
        check: SeasonalCheck::Always,
        message: "Épandage d'azote interdit du 15 novembre au 15 janvier (programme d'actions directive nitrates)",
    },
    SeasonalRule {
        practice: is_spraying,
        window: FLOWERING_SEASON,
        check: SeasonalCheck::Always,
        message: "Période de floraison (avril à juillet) : vérifier l'absence de pollinisateurs actifs avant tout traitement",
    },
    SeasonalRule {
        practice: is_spraying,
        window: FLOWERING_SEASON,
        check: SeasonalCheck::WhenFlowering,
        message: "Floraison en cours : seuls les produits portant la mention abeilles sont autorisés, appliqués autour du coucher du soleil",
    },
    SeasonalRule {
        practice: is_irrigation,
        window: LOW_WATER_SEASON,
        check: SeasonalCheck::Always,
        message: "Période d'étiage : consulter les arrêtés préfectoraux de restriction des usages de l'eau",
    },
];

/// Restrictions from the fixed seasonal calendar applying on `date`.
pub fn seasonal_restrictions(
    practice: &PracticeType,
    date: NaiveDate,
    conditions: &EnvironmentalConditions,
) -> Vec<String> {
    SEASONAL_CALENDAR
        .iter()
        .filter(|rule| (rule.practice)(practice) && rule.window.contains(date))
        .filter(|rule| match rule.check {
            SeasonalCheck::Always => true,
            SeasonalCheck::WhenFlowering => conditions.pollinator_flowering.unwrap_or(false),
        })
        .map(|rule| rule.message.to_string())
        .collect()
}
