use agriconform_core::compliance::znt::{self, ZntInput};
use agriconform_core::domain::conditions::DriftReductionClass;
use agriconform_core::domain::water::WaterBodyCategory;

use crate::commands::CommandResult;

#[derive(Clone, Debug, Default)]
pub struct ZntArgs {
    pub base: f64,
    pub drift: Option<String>,
    pub vegetation: bool,
    pub category: Option<String>,
}

pub fn run(args: &ZntArgs) -> CommandResult {
    let drift_class = match args.drift.as_deref().map(str::parse::<DriftReductionClass>) {
        Some(Ok(class)) => class,
        Some(Err(error)) => {
            return CommandResult::failure("znt", "validation", error.to_string(), 2);
        }
        None => DriftReductionClass::None,
    };
    let category =
        args.category.as_deref().map(WaterBodyCategory::parse_lenient).unwrap_or_default();

    let input = ZntInput::new(args.base, category)
        .with_drift_class(drift_class)
        .with_vegetation_buffer(args.vegetation);

    match znt::calculate(&input) {
        Ok(requirement) => {
            let message = format!(
                "required {} m, effective {} m",
                requirement.required_distance_m,
                requirement.effective_distance_m()
            );
            CommandResult::success_with("znt", message, &requirement)
        }
        Err(error) => CommandResult::failure("znt", "validation", error.to_string(), 2),
    }
}
