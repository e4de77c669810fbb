use serde::{Deserialize, Serialize};

use crate::clinical::EngineError;
use crate::models::Language;

/// Application-level constants
pub const APP_NAME: &str = "aidux";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("warn,{}=info", env!("CARGO_CRATE_NAME"))
}

/// Completeness thresholds (percent) used by the prioritizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriorityThresholds {
    /// Below this, every missing attribute is high priority.
    pub urgent_below: u8,
    /// Below this, non-essential missing attributes are medium priority.
    pub partial_below: u8,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            urgent_below: 30,
            partial_below: 70,
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Language the follow-up questions are rendered in.
    pub language: Language,
    pub thresholds: PriorityThresholds,
    /// Distinct key phrases a red-flag template needs before it fires.
    pub min_corroborating_phrases: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            thresholds: PriorityThresholds::default(),
            min_corroborating_phrases: 2,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let PriorityThresholds {
            urgent_below,
            partial_below,
        } = self.thresholds;
        if urgent_below >= partial_below {
            return Err(EngineError::InvalidConfig(format!(
                "urgentBelow ({urgent_below}) must be lower than partialBelow ({partial_below})"
            )));
        }
        if partial_below > 100 {
            return Err(EngineError::InvalidConfig(format!(
                "partialBelow ({partial_below}) must not exceed 100"
            )));
        }
        if self.min_corroborating_phrases < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "minCorroboratingPhrases ({}) must be at least 2",
                self.min_corroborating_phrases
            )));
        }
        Ok(())
    }
}
