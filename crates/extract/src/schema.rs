use serde::{Deserialize, Serialize};

/// One answer to a question, attributed to a speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub question: String,
    pub answer: String,
    /// Label as it appeared in the transcript, trimmed
    pub label: String,
    /// Canonical candidate name; `None` when the label was too far from every candidate
    pub speaker: Option<String>,
    pub nationality: Option<String>,
}

/// Final corpus row, column order matches the exported CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedRecord {
    pub question: String,
    pub answer: String,
    pub event: String,
    pub date: String,
    #[serde(rename = "name")]
    pub speaker: String,
    pub nationality: Option<String>,
}

impl AttributedRecord {
    /// Attach transcript metadata; `None` if the answer has no resolved speaker.
    pub fn from_attribution(attribution: Attribution, event: &str, date: &str) -> Option<Self> {
        let speaker = attribution.speaker?;
        Some(Self {
            question: attribution.question,
            answer: attribution.answer,
            event: event.to_string(),
            date: date.to_string(),
            speaker,
            nationality: attribution.nationality,
        })
    }
}
