//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::eval::EvalWeights;

/// Search and evaluation settings.
///
/// Every field has a default, so a host may deserialize a partial JSON object.
///
/// ```
/// use trinode::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "max_depth": 6, "time_limit_ms": 250 }"#).unwrap();
/// assert_eq!(config.max_depth, 6);
/// assert!(config.use_tt);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest iterative-deepening iteration, in plies
    pub max_depth: u32,
    /// Wall-clock budget per engine move
    pub time_limit_ms: u64,
    /// Minimum transposition table slots
    pub tt_entries: usize,
    /// Probe and store the transposition table
    pub use_tt: bool,
    /// Fixed depth of the post-game analysis search
    pub analysis_depth: u32,
    /// Evaluator weights
    pub weights: EvalWeights,
}

impl EngineConfig {
    /// Default configuration with a custom depth and time budget.
    #[must_use]
    pub fn with_limits(max_depth: u32, time_limit_ms: u64) -> Self {
        Self {
            max_depth,
            time_limit_ms,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            time_limit_ms: 500,
            tt_entries: 1 << 14,
            use_tt: true,
            analysis_depth: 4,
            weights: EvalWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "use_tt": false }"#).unwrap();
        assert!(!config.use_tt);
        assert_eq!(config.max_depth, EngineConfig::default().max_depth);
        assert_eq!(config.weights, EvalWeights::default());
    }

    #[test]
    fn test_weights_override() {
        let config = EngineConfig::from_json(r#"{ "weights": { "center": 35 } }"#).unwrap();
        assert_eq!(config.weights.center, 35);
        assert_eq!(config.weights.mobility, EvalWeights::default().mobility);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(EngineConfig::from_json("{ max_depth: ").is_err());
    }

    #[test]
    fn test_with_limits() {
        let config = EngineConfig::with_limits(3, 50);
        assert_eq!((config.max_depth, config.time_limit_ms), (3, 50));
        assert_eq!(config.analysis_depth, 4);
    }
}
