use anyhow::{Context, Result};
use extract::AttributorConfig;
use ingest::{FilterConfig, SegmenterConfig};
use nationality::{DuplicatePolicy, InferenceConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub segmenter: SegmenterConfig,
    pub attribution: AttributorConfig,
    pub nationality: NationalityConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
    /// Fan out across transcripts and names with rayon
    pub parallel: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationalityConfig {
    pub duplicate_policy: DuplicatePolicy,
    #[serde(flatten)]
    pub inference: InferenceConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Drop records whose speaker has no inferred nationality
    pub require_nationality: bool,
}

impl CorpusConfig {
    /// Major-league baseball press conferences, complete rows only.
    pub fn mlb() -> Self {
        Self {
            filter: FilterConfig::mlb(),
            output: OutputConfig {
                require_nationality: true,
            },
            ..Self::default()
        }
    }

    /// Load a JSON config; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config: {:?}", path))?;
        let config = serde_json::from_str(&content)
            .context(format!("Failed to parse config: {:?}", path))?;
        Ok(config)
    }

    /// The segmenter and the attributor must agree on the question marker.
    pub fn attributor_config(&self) -> AttributorConfig {
        AttributorConfig {
            question_marker: self.segmenter.question_marker.clone(),
            ..self.attribution.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "attribution": { "max_label_distance": 5 },
            "nationality": { "duplicate_policy": "reject", "word_boundaries": true },
            "parallel": true
        }"#;
        let config: CorpusConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.attribution.max_label_distance, Some(5));
        assert!(config.attribution.inline_label_fallback);
        assert_eq!(config.nationality.duplicate_policy, DuplicatePolicy::Reject);
        assert!(config.nationality.inference.word_boundaries);
        assert_eq!(config.segmenter, SegmenterConfig::default());
        assert!(config.parallel);
        assert!(!config.output.require_nationality);
    }

    #[test]
    fn test_mlb_preset() {
        let config = CorpusConfig::mlb();
        assert!(config.output.require_nationality);
        assert!(config.filter.dedup_by_text);
        assert!(!config.filter.include_events.is_empty());
    }

    #[test]
    fn test_attributor_follows_segmenter_marker() {
        let mut config = CorpusConfig::default();
        config.segmenter.question_marker = "QUESTION:".to_string();
        assert_eq!(config.attributor_config().question_marker, "QUESTION:");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, r#"{"output": {"require_nationality": true}}"#).unwrap();

        let config = CorpusConfig::from_file(&path).unwrap();
        assert!(config.output.require_nationality);

        std::fs::write(&path, "not json").unwrap();
        assert!(CorpusConfig::from_file(&path).is_err());
    }
}
