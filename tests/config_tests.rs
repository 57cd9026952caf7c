//! Configuration loading

use incentive_consensus::config::{DebugConfig, GeneratorConfig, IncentiveConfig};
use std::sync::Mutex;

#[test]
fn test_defaults() {
    let config = IncentiveConfig::default();
    assert_eq!(config.generator.expiration_seconds, 30);
    assert_eq!(config.generator.max_operations_override, 0);
    assert!(config.debug.log_emitted_operations);
    assert!(config.debug.log_rejections);
}

#[test]
fn test_json_round_trip() {
    let config = IncentiveConfig {
        generator: GeneratorConfig {
            expiration_seconds: 45,
            max_operations_override: 7,
        },
        debug: DebugConfig {
            log_emitted_operations: false,
            log_rejections: true,
        },
    };
    let json = serde_json::to_string(&config).unwrap();
    let parsed: IncentiveConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_missing_fields_take_defaults() {
    let parsed: IncentiveConfig =
        serde_json::from_str(r#"{"generator": {"max_operations_override": 5}}"#).unwrap();
    assert_eq!(parsed.generator.max_operations_override, 5);
    assert_eq!(parsed.generator.expiration_seconds, 30);
    assert_eq!(parsed.debug, DebugConfig::default());

    let empty: IncentiveConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, IncentiveConfig::default());
}

/// Serializes tests that touch process environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

const EXPIRATION_VAR: &str = "INCENTIVE_CONSENSUS_GENERATOR_EXPIRATION_SECONDS";
const OVERRIDE_VAR: &str = "INCENTIVE_CONSENSUS_GENERATOR_MAX_OPERATIONS_OVERRIDE";
const LOG_OPS_VAR: &str = "INCENTIVE_CONSENSUS_DEBUG_LOG_EMITTED_OPERATIONS";
const LOG_REJECTIONS_VAR: &str = "INCENTIVE_CONSENSUS_DEBUG_LOG_REJECTIONS";

fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for var in [EXPIRATION_VAR, OVERRIDE_VAR, LOG_OPS_VAR, LOG_REJECTIONS_VAR] {
        std::env::remove_var(var);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    f();
    for (key, _) in vars {
        std::env::remove_var(key);
    }
}

#[test]
fn test_from_env_without_variables() {
    with_env(&[], || {
        assert_eq!(IncentiveConfig::from_env(), IncentiveConfig::default());
    });
}

#[test]
fn test_from_env_reads_every_variable() {
    with_env(
        &[
            (EXPIRATION_VAR, "90"),
            (OVERRIDE_VAR, "12"),
            (LOG_OPS_VAR, "false"),
            (LOG_REJECTIONS_VAR, "false"),
        ],
        || {
            let config = IncentiveConfig::from_env();
            assert_eq!(config.generator.expiration_seconds, 90);
            assert_eq!(config.generator.max_operations_override, 12);
            assert!(!config.debug.log_emitted_operations);
            assert!(!config.debug.log_rejections);
        },
    );
}

#[test]
fn test_from_env_unparsable_values_keep_defaults() {
    with_env(
        &[
            (EXPIRATION_VAR, "soon"),
            (OVERRIDE_VAR, "-3"),
            (LOG_OPS_VAR, "yes"),
            (LOG_REJECTIONS_VAR, "0"),
        ],
        || {
            assert_eq!(IncentiveConfig::from_env(), IncentiveConfig::default());
        },
    );
}

#[test]
fn test_from_env_mixed_values() {
    with_env(&[(EXPIRATION_VAR, "45"), (LOG_REJECTIONS_VAR, "maybe")], || {
        let config = IncentiveConfig::from_env();
        assert_eq!(config.generator.expiration_seconds, 45);
        assert_eq!(config.generator.max_operations_override, 0);
        assert!(config.debug.log_emitted_operations);
        assert!(config.debug.log_rejections);
    });
}
