use agriconform_core::compliance::catalog;
use agriconform_core::domain::practice::PracticeType;
use agriconform_core::domain::regulation::{ComplianceStatus, RegulationRecord};

use crate::commands::CommandResult;

/// Static catalog rows only; statuses are `unknown` because no site
/// conditions are evaluated.
pub fn run(practice: &str) -> CommandResult {
    let practice = match practice.parse::<PracticeType>() {
        Ok(practice) => practice,
        Err(error) => {
            return CommandResult::failure("catalog", "validation", error.to_string(), 2);
        }
    };

    let regulations: Vec<RegulationRecord> = catalog::regulations_for(&practice)
        .iter()
        .map(|entry| entry.to_record(ComplianceStatus::Unknown))
        .collect();

    let message = format!("{} catalog regulation(s) for {practice}", regulations.len());
    CommandResult::success_with("catalog", message, &regulations)
}
