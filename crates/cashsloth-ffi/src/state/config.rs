//! # Configuration State
//!
//! Builds the [`EngineConfig`] used by `cs_init`.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CASHSLOTH_*`)
//! 2. Defaults ([`EngineConfig::default`])
//!
//! `cs_init_with_config_json` bypasses this file entirely.

use cashsloth_core::{ChangePolicy, EngineConfig};
use tracing::warn;

pub const CHANGE_POLICY_VAR: &str = "CASHSLOTH_CHANGE_POLICY";
pub const MAX_LINE_QUANTITY_VAR: &str = "CASHSLOTH_MAX_LINE_QUANTITY";
pub const LOG_VAR: &str = "CASHSLOTH_LOG";

/// Reads the engine config from the process environment.
///
/// ## Environment Variables
/// - `CASHSLOTH_CHANGE_POLICY`: `report`, `clamp` or `reject`
/// - `CASHSLOTH_MAX_LINE_QUANTITY`: positive integer ceiling per line
///
/// Unparseable values are skipped with a warning.
pub fn config_from_env() -> EngineConfig {
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Same as [`config_from_env`] with an injectable variable source.
pub fn config_from_lookup<F>(lookup: F) -> EngineConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = EngineConfig::default();

    if let Some(raw) = lookup(CHANGE_POLICY_VAR) {
        match raw.parse::<ChangePolicy>() {
            Ok(policy) => config.change_policy = policy,
            Err(e) => warn!(var = CHANGE_POLICY_VAR, value = %raw, error = %e, "ignoring setting"),
        }
    }

    if let Some(raw) = lookup(MAX_LINE_QUANTITY_VAR) {
        match raw.trim().parse::<i64>() {
            Ok(max) if max >= 1 => config.max_line_quantity = Some(max),
            _ => warn!(var = MAX_LINE_QUANTITY_VAR, value = %raw, "ignoring setting"),
        }
    }

    config
}

/// Log filter directive, if logging was requested.
pub fn log_filter_from_env() -> Option<String> {
    std::env::var(LOG_VAR).ok().filter(|v| !v.trim().is_empty())
}
