use agriconform_core::compliance::water_body;
use agriconform_core::domain::water::{WaterBodyCategory, WaterBodyDescriptor};

use crate::commands::CommandResult;

pub fn run(category: Option<&str>) -> CommandResult {
    let descriptors: Vec<WaterBodyDescriptor> = match category {
        Some(raw) => {
            let category = WaterBodyCategory::parse_lenient(raw);
            vec![water_body::classify(Some(category)).to_descriptor()]
        }
        None => WaterBodyCategory::ALL
            .into_iter()
            .map(|category| water_body::classify(Some(category)).to_descriptor())
            .collect(),
    };

    let message = match descriptors.as_slice() {
        [single] => format!("{}: {} m base buffer", single.label, single.base_buffer_m),
        all => format!("{} water body categories", all.len()),
    };
    CommandResult::success_with("water-body", message, &descriptors)
}
