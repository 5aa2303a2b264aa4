use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One interview page: raw text plus the metadata scraped alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub event: String,
    pub date: String,
    #[serde(rename = "names", alias = "candidate_names")]
    pub candidate_names: Vec<String>,
}

impl Transcript {
    pub fn new(
        text: String,
        event: String,
        date: String,
        candidate_names: Vec<String>,
    ) -> Self {
        Self {
            text,
            event,
            date,
            candidate_names,
        }
    }

    /// Stable ID derived from the transcript text only, so two scrapes of
    /// the same page collapse to the same ID.
    pub fn content_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..16]) // Use first 16 bytes (32 hex chars)
    }
}

/// A fragment of a transcript starting at a question marker and running up
/// to the next one (or the end of the text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBlock {
    /// Position of the block within its transcript (0-based, chronological)
    pub index: usize,
    pub text: String,
}

impl QuestionBlock {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_ignores_metadata() {
        let a = Transcript::new("Q. Hi?".into(), "WORLD SERIES".into(), "Oct 1".into(), vec![]);
        let b = Transcript::new("Q. Hi?".into(), "NLCS".into(), "Oct 9".into(), vec!["X".into()]);
        let c = Transcript::new("Q. Bye?".into(), "WORLD SERIES".into(), "Oct 1".into(), vec![]);

        assert_eq!(a.content_id(), b.content_id());
        assert_ne!(a.content_id(), c.content_id());
        assert_eq!(a.content_id().len(), 32);
    }

    #[test]
    fn test_deserialize_accepts_names_column() {
        let json = r#"{"text": "Q. Hi?", "event": "E", "date": "D", "names": ["John Smith"]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.candidate_names, vec!["John Smith".to_string()]);

        let json = r#"{"text": "", "event": "E", "date": "D", "candidate_names": []}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert!(transcript.candidate_names.is_empty());
    }
}
