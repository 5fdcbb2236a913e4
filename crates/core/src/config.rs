//! Configuration for the diff engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::AlgorithmKind;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::tokenizers::{Granularity, SegmenterKind};

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration for a merge session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Comparison unit for the full-text diff
    pub granularity: Granularity,

    /// Word segmentation strategy, fixed for the engine's lifetime
    pub segmenter: SegmenterKind,

    /// Algorithm used for the full-text diff
    pub algorithm: AlgorithmKind,

    /// Pad copied lines with newlines to preserve paragraph separation
    pub smart_newlines: bool,

    /// Snapshots kept by the merge buffer history
    pub history_limit: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            granularity: Granularity::default(),
            segmenter: SegmenterKind::default(),
            algorithm: AlgorithmKind::default(),
            smart_newlines: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Parse a JSON configuration blob; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(?config, "loaded merge configuration");
        Ok(config)
    }

    /// Serialize to a JSON blob the host can persist
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "history_limit",
                reason: "must keep at least one snapshot".to_string(),
            });
        }
        Ok(())
    }

    /// Set the diff granularity
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the word segmentation strategy
    pub fn with_segmenter(mut self, segmenter: SegmenterKind) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Set the diff algorithm
    pub fn with_algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_smart_newlines(mut self, enabled: bool) -> Self {
        self.smart_newlines = enabled;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MergeConfig::default();

        assert_eq!(config.granularity, Granularity::Word);
        assert_eq!(config.segmenter, SegmenterKind::Unicode);
        assert_eq!(config.algorithm, AlgorithmKind::Myers);
        assert!(config.smart_newlines);
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{"granularity":"character","smart_newlines":false}"#;

        let config = MergeConfig::from_json(json).unwrap();

        assert_eq!(config.granularity, Granularity::Character);
        assert!(!config.smart_newlines);
        assert_eq!(config.algorithm, AlgorithmKind::Myers);
    }

    #[test]
    fn test_json_round_trip() {
        let config = MergeConfig::new()
            .with_algorithm(AlgorithmKind::Patience)
            .with_segmenter(SegmenterKind::Fallback)
            .with_history_limit(20);

        let json = config.to_json().unwrap();

        assert_eq!(MergeConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_history_limit() {
        let err = MergeConfig::from_json(r#"{"history_limit":0}"#).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { field: "history_limit", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = MergeConfig::from_json(r#"{"granularity":"sentence"}"#).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }
}
