use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use agriconform_cli::commands::{assess, catalog, config, water_body, znt};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn assess_reports_prohibited_spraying_near_water() {
    with_env(&[], || {
        let dir = TempDir::new().expect("tempdir");
        let input = write(
            &dir,
            "request.json",
            r#"{
                "practice_type": "spraying",
                "environmental_conditions": {"water_distance_m": 3, "wind_speed_kmh": 10},
                "application_date": "2026-10-05"
            }"#,
        );

        let result = assess::run(&input, None);
        assert_eq!(result.exit_code, 0, "expected successful assessment");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "assess");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["non_compliant_count"], 1);
        assert_eq!(payload["data"]["data_source"], "catalog_only");
        let warnings = payload["data"]["critical_warnings"].as_array().expect("warnings array");
        assert!(warnings
            .iter()
            .any(|warning| warning.as_str().unwrap_or_default().contains("traitement interdit")));
    });
}

#[test]
fn assess_merges_registry_products() {
    with_env(&[], || {
        let dir = TempDir::new().expect("tempdir");
        let registry = write(
            &dir,
            "products.json",
            r#"{"products": [{"id": "2000123", "buffers": {"aquatic_m": 20}}]}"#,
        );
        let input = write(
            &dir,
            "request.json",
            r#"{
                "practice_type": "pulvérisation",
                "environmental_conditions": {
                    "water_distance_m": 12,
                    "water_body_category": "permanent_stream",
                    "drift_reduction_class": "3-star"
                },
                "product_ids": ["2000123", "9999999"],
                "application_date": "2026-10-05"
            }"#,
        );

        let result = assess::run(&input, Some(registry));
        assert_eq!(result.exit_code, 0, "expected successful assessment");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["data_source"], "hybrid");
        assert_eq!(payload["data"]["practice_type"], "spraying");
        assert_eq!(payload["data"]["znt_requirements"]["aquatic"]["reduced_distance_m"], 13.4);
        assert_eq!(payload["data"]["znt_requirements"]["aquatic"]["is_compliant"], false);
        assert_eq!(payload["data"]["water_body"]["is_fish_bearing"], true);
    });
}

#[test]
fn assess_registry_path_comes_from_config() {
    let dir = TempDir::new().expect("tempdir");
    let registry = write(
        &dir,
        "products.json",
        r#"{"products": [{"id": "P1", "buffers": {"aquatic_m": 5}}]}"#,
    );
    let registry = registry.to_string_lossy().into_owned();

    with_env(&[("AGRICONFORM_REGISTRY_PATH", registry.as_str())], || {
        let input = write(
            &dir,
            "request.json",
            r#"{"practice_type": "irrigation", "product_ids": ["P1"], "application_date": "2026-03-01"}"#,
        );

        let result = assess::run(&input, None);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["data_source"], "hybrid");
        assert_eq!(payload["data"]["total_regulations"], 3);
    });
}

#[test]
fn assess_returns_validation_failure_without_practice() {
    with_env(&[], || {
        let dir = TempDir::new().expect("tempdir");
        let input = write(&dir, "request.json", r#"{"product_ids": ["2000123"]}"#);

        let result = assess::run(&input, None);
        assert_eq!(result.exit_code, 1, "expected assessment failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "validation");
        assert_eq!(payload["data"]["success"], false);
        assert_eq!(payload["data"]["regulations"].as_array().map(Vec::len), Some(0));
    });
}

#[test]
fn assess_rejects_unreadable_input_and_registry() {
    with_env(&[], || {
        let dir = TempDir::new().expect("tempdir");

        let missing_input = assess::run(&dir.path().join("absent.json"), None);
        assert_eq!(missing_input.exit_code, 2);
        assert_eq!(parse_payload(&missing_input.output)["error_class"], "input");

        let input = write(&dir, "request.json", r#"{"practice_type": "spraying"}"#);
        let missing_registry = assess::run(&input, Some(dir.path().join("absent-products.json")));
        assert_eq!(missing_registry.exit_code, 4);
        assert_eq!(parse_payload(&missing_registry.output)["error_class"], "registry_load");
    });
}

#[test]
fn assess_returns_config_failure_for_invalid_timeout() {
    with_env(&[("AGRICONFORM_REGISTRY_LOOKUP_TIMEOUT_SECS", "0")], || {
        let dir = TempDir::new().expect("tempdir");
        let input = write(&dir, "request.json", r#"{"practice_type": "spraying"}"#);

        let result = assess::run(&input, None);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn catalog_lists_practice_regulations() {
    let result = catalog::run("fertilisation");
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "catalog");
    let regulations = payload["data"].as_array().expect("regulation list");
    assert_eq!(regulations.len(), 3);
    assert!(regulations.iter().all(|regulation| regulation["compliance_status"] == "unknown"));

    let rejected = catalog::run("spray!");
    assert_eq!(rejected.exit_code, 2);
    assert_eq!(parse_payload(&rejected.output)["error_class"], "validation");
}

#[test]
fn water_body_describes_one_or_all_categories() {
    let drinking = parse_payload(&water_body::run(Some("drinking_water_source")).output);
    assert_eq!(drinking["data"][0]["base_buffer_m"], 200.0);
    assert_eq!(drinking["data"][0]["reduction_allowed"], false);

    let unknown = parse_payload(&water_body::run(Some("estuary")).output);
    assert_eq!(unknown["data"][0]["category"], "unknown");

    let all = parse_payload(&water_body::run(None).output);
    assert_eq!(all["data"].as_array().map(Vec::len), Some(7));
}

#[test]
fn znt_applies_combined_reductions() {
    let result = znt::run(&znt::ZntArgs {
        base: 20.0,
        drift: Some("3-star".to_string()),
        vegetation: true,
        category: None,
    });
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["required_distance_m"], 20.0);
    assert_eq!(payload["data"]["reduced_distance_m"], 9.4);
    assert_eq!(payload["data"]["applied_reduction_pct"], 53.0);
}

#[test]
fn znt_rejects_invalid_arguments() {
    let bad_drift = znt::run(&znt::ZntArgs {
        base: 20.0,
        drift: Some("7-star".to_string()),
        ..znt::ZntArgs::default()
    });
    assert_eq!(bad_drift.exit_code, 2);

    let bad_base = znt::run(&znt::ZntArgs { base: -1.0, ..znt::ZntArgs::default() });
    assert_eq!(bad_base.exit_code, 2);
    assert_eq!(parse_payload(&bad_base.output)["error_class"], "validation");
}

#[test]
fn config_attributes_sources() {
    with_env(&[("AGRICONFORM_LOG_LEVEL", "warn")], || {
        let output = config::run();
        assert!(output.starts_with("effective config"));
        assert!(output.contains("- registry.lookup_timeout_secs = 10 (source: default)"));
        assert!(output.contains("- registry.path = <unset> (source: default)"));
        assert!(output.contains("- logging.level = warn (source: env (AGRICONFORM_LOG_LEVEL))"));
    });
}

fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("fixture should be writable");
    path
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "AGRICONFORM_REGISTRY_PATH",
        "AGRICONFORM_REGISTRY_LOOKUP_TIMEOUT_SECS",
        "AGRICONFORM_LOGGING_LEVEL",
        "AGRICONFORM_LOGGING_FORMAT",
        "AGRICONFORM_LOG_LEVEL",
        "AGRICONFORM_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
