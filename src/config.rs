//! Configuration for incentive-consensus
//!
//! Operational settings for incentive generation and diagnostics. These can be
//! deserialized from a config file, read from environment variables, or passed
//! programmatically. Chain parameters (the per-block cap, the issuance rate)
//! are on-chain state and live in [`crate::types::ChainParameters`], not here.

use crate::constants::INCENTIVE_TX_EXPIRATION_SECONDS;
use serde::{Deserialize, Serialize};

/// Incentive transaction generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seconds after head block time at which the generated transaction expires
    /// Default: 30
    /// WARNING: Changing this changes the transaction id other nodes expect
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: u64,

    /// Operation cap override (for testing only)
    /// Default: 0 (use the on-chain max_incentive_operations_per_block)
    /// WARNING: Changing this may cause consensus divergence
    #[serde(default)]
    pub max_operations_override: u32,
}

fn default_expiration_seconds() -> u64 {
    INCENTIVE_TX_EXPIRATION_SECONDS
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            expiration_seconds: INCENTIVE_TX_EXPIRATION_SECONDS,
            max_operations_override: 0,
        }
    }
}

impl GeneratorConfig {
    /// Effective operation cap given the on-chain value
    pub fn operation_cap(&self, chain_cap: u32) -> usize {
        if self.max_operations_override > 0 {
            self.max_operations_override as usize
        } else {
            chain_cap as usize
        }
    }
}

/// Debug and diagnostics configuration
///
/// Logging is diagnostic only; nothing here changes what is generated or applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log every generated incentive operation at debug level
    /// Default: true
    #[serde(default = "default_true")]
    pub log_emitted_operations: bool,

    /// Log operations rejected by the evaluator at warn level
    /// Default: true
    #[serde(default = "default_true")]
    pub log_rejections: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_emitted_operations: true,
            log_rejections: true,
        }
    }
}

/// Complete incentive-consensus configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IncentiveConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

impl IncentiveConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("INCENTIVE_CONSENSUS_GENERATOR_EXPIRATION_SECONDS") {
            if let Ok(seconds) = val.parse::<u64>() {
                config.generator.expiration_seconds = seconds;
            }
        }
        if let Ok(val) = std::env::var("INCENTIVE_CONSENSUS_GENERATOR_MAX_OPERATIONS_OVERRIDE") {
            if let Ok(cap) = val.parse::<u32>() {
                config.generator.max_operations_override = cap;
            }
        }

        if let Ok(val) = std::env::var("INCENTIVE_CONSENSUS_DEBUG_LOG_EMITTED_OPERATIONS") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.debug.log_emitted_operations = enabled;
            }
        }
        if let Ok(val) = std::env::var("INCENTIVE_CONSENSUS_DEBUG_LOG_REJECTIONS") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.debug.log_rejections = enabled;
            }
        }

        config
    }
}

/// Global incentive configuration instance
///
/// Initialized once at startup; consensus entry points still take their
/// configuration explicitly, this is only a convenience for the node layer.
static GLOBAL_INCENTIVE_CONFIG: std::sync::OnceLock<IncentiveConfig> = std::sync::OnceLock::new();

/// Initialize the global configuration
///
/// Returns the rejected config if it was already initialized.
pub fn init_incentive_config(config: IncentiveConfig) -> Result<(), IncentiveConfig> {
    GLOBAL_INCENTIVE_CONFIG.set(config)
}

/// Get the global configuration, falling back to the environment
pub fn get_incentive_config() -> IncentiveConfig {
    GLOBAL_INCENTIVE_CONFIG
        .get()
        .cloned()
        .unwrap_or_else(IncentiveConfig::from_env)
}
