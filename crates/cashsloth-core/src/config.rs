//! # Engine Configuration
//!
//! Knobs that change engine policy. Defaults reproduce the canonical
//! behavior; the C boundary fills these from the environment or a JSON blob.
//!
//! ```json
//! { "change_policy": "report", "max_line_quantity": 999 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};

/// How change is derived from tender and total.
///
/// ```text
///   given 1000, total 1400
///   ─────────────────────────────────────────────────────────
///   Report             set_tendered ok   change = -400
///   ClampToZero        set_tendered ok   change =    0
///   RejectInsufficient set_tendered → InvalidAmount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangePolicy {
    /// `change = given − total`, negative when short.
    #[default]
    Report,

    /// Never report negative change.
    ClampToZero,

    /// Refuse a tender lower than the current total.
    RejectInsufficient,
}

impl std::str::FromStr for ChangePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" | "unclamped" => Ok(ChangePolicy::Report),
            "clamp" | "clamp_to_zero" => Ok(ChangePolicy::ClampToZero),
            "reject" | "reject_insufficient" => Ok(ChangePolicy::RejectInsufficient),
            other => Err(CoreError::malformed(format!(
                "Unknown change policy: '{other}'. Valid options: report, clamp, reject"
            ))),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How change is computed and whether short tenders are accepted.
    pub change_policy: ChangePolicy,

    /// Per-line quantity ceiling. `None` means only overflow limits apply.
    pub max_line_quantity: Option<i64>,
}

impl EngineConfig {
    /// Parses a JSON config; absent fields keep their defaults.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| CoreError::malformed(format!("invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field rules.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(max) = self.max_line_quantity {
            if max < 1 {
                return Err(CoreError::malformed(
                    ValidationError::MustBePositive {
                        field: "max_line_quantity".to_string(),
                    }
                    .to_string(),
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
