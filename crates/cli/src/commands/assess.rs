use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use agriconform_core::config::{AppConfig, LoadOptions};
use agriconform_core::{ComplianceEngine, EngineSettings};
use agriconform_registry::{load_registry_file, InMemoryProductRegistry};

use crate::commands::CommandResult;

pub fn run(input: &Path, registry: Option<PathBuf>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "assess",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let payload = match read_request(input) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure("assess", "input", format!("{error:#}"), 2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "assess",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let registry_path = registry.or_else(|| config.registry.path.clone());
    let result = runtime.block_on(async {
        let registry = match registry_path {
            Some(path) => load_registry_file(&path)
                .await
                .map_err(|error| ("registry_load", error.to_string(), 4u8))?,
            None => InMemoryProductRegistry::default(),
        };
        let engine = ComplianceEngine::with_settings(registry, EngineSettings::from(&config));
        Ok::<_, (&'static str, String, u8)>(engine.assess_json(&payload).await)
    });

    match result {
        Ok(assessment) if assessment.success => {
            let message = format!(
                "{} regulation(s) evaluated, {} non-compliant",
                assessment.total_regulations, assessment.non_compliant_count
            );
            CommandResult::success_with("assess", message, &assessment)
        }
        Ok(assessment) => {
            let error_class = assessment
                .error_type
                .map(|kind| kind.as_str())
                .unwrap_or("unknown");
            let message = assessment.error.clone().unwrap_or_default();
            CommandResult::failure_with("assess", error_class, message, 1, Some(&assessment))
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("assess", error_class, message, exit_code)
        }
    }
}

fn read_request(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut payload = String::new();
        std::io::stdin()
            .read_to_string(&mut payload)
            .context("could not read assessment request from stdin")?;
        return Ok(payload);
    }

    std::fs::read_to_string(input)
        .with_context(|| format!("could not read assessment request `{}`", input.display()))
}
