use serde::{Deserialize, Serialize};

use crate::transcript::QuestionBlock;

pub const QUESTION_MARKER: &str = "Q.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Literal that opens every question in a transcript
    pub question_marker: String,
    /// Mojibake rewrites applied in order before splitting
    pub repairs: Vec<(String, String)>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            question_marker: QUESTION_MARKER.to_string(),
            repairs: vec![
                // UTF-8 right single quote decoded as cp1252
                ("â€™".to_string(), "'".to_string()),
                ("Â".to_string(), String::new()),
            ],
        }
    }
}

pub struct TranscriptSegmenter {
    config: SegmenterConfig,
}

impl TranscriptSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn question_marker(&self) -> &str {
        &self.config.question_marker
    }

    /// Split a raw transcript into question blocks, in interview order.
    ///
    /// Every block starts at an occurrence of the question marker and keeps
    /// it. Text before the first marker is preamble and is discarded, so a
    /// transcript without any marker yields no blocks.
    pub fn segment(&self, text: &str) -> Vec<QuestionBlock> {
        let text = self.repair(text);
        let marker = self.config.question_marker.as_str();

        if marker.is_empty() {
            return Vec::new();
        }

        let starts: Vec<usize> = text.match_indices(marker).map(|(i, _)| i).collect();

        starts
            .iter()
            .enumerate()
            .map(|(index, &start)| {
                let end = starts.get(index + 1).copied().unwrap_or(text.len());
                QuestionBlock::new(index, text[start..end].to_string())
            })
            .collect()
    }

    /// Apply the configured mojibake rewrites.
    pub fn repair(&self, text: &str) -> String {
        let mut repaired = text.to_string();
        for (from, to) in &self.config.repairs {
            if !from.is_empty() && repaired.contains(from.as_str()) {
                repaired = repaired.replace(from.as_str(), to);
            }
        }
        repaired
    }
}

impl Default for TranscriptSegmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_counts_question_markers() {
        let segmenter = TranscriptSegmenter::default();
        let text = "Intro. Q. First? ANSWERER: Yes. Q. Second? ANSWERER: No.";
        let blocks = segmenter.segment(text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "Q. First? ANSWERER: Yes. ");
        assert_eq!(blocks[1].text, "Q. Second? ANSWERER: No.");
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[1].index, 1);
    }

    #[test]
    fn test_preamble_only_yields_nothing() {
        let segmenter = TranscriptSegmenter::default();
        assert!(segmenter.segment("Opening statement, no questions taken.").is_empty());
        assert!(segmenter.segment("").is_empty());
    }

    #[test]
    fn test_marker_at_start_keeps_first_block() {
        let segmenter = TranscriptSegmenter::default();
        let blocks = segmenter.segment("Q. Only one?\nJOHN SMITH: Sure.");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.starts_with("Q. Only one?"));
    }

    #[test]
    fn test_mojibake_is_repaired_before_split() {
        let segmenter = TranscriptSegmenter::default();
        let blocks = segmenter.segment("Q. Didnâ€™t you\u{a0}Â want it?\nJOHN: Â Yes.");

        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.contains("Didn't"));
        assert!(!blocks[0].text.contains('Â'));
    }

    #[test]
    fn test_custom_marker() {
        let segmenter = TranscriptSegmenter::new(SegmenterConfig {
            question_marker: "QUESTION:".to_string(),
            repairs: Vec::new(),
        });
        let blocks = segmenter.segment("pre QUESTION: a\nX: b QUESTION: c\nY: d");
        assert_eq!(blocks.len(), 2);
    }
}
