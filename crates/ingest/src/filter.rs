use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

use crate::transcript::Transcript;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Keep only events matching one of these (case-insensitive); empty keeps all
    pub include_events: Vec<String>,
    /// Drop events matching one of these (case-sensitive)
    pub exclude_events: Vec<String>,
    /// Drop transcripts whose text was already seen
    pub dedup_by_text: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_events: Vec::new(),
            exclude_events: Vec::new(),
            dedup_by_text: true,
        }
    }
}

impl FilterConfig {
    /// Major-league baseball press conferences, minus college and
    /// international events that share the same naming.
    pub fn mlb() -> Self {
        Self {
            include_events: ["MLB ", "NL ", "AL ", "WORLD SERIES", "HOME RUN CHASE", "MEDIA CONFERENCE"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_events: [
                "NCAA",
                "UNIVERSITY",
                "COLLEGE",
                "COLLEGIATE",
                "STATE",
                "MUNDIAL",
                "ATLANTIC COAST",
                "WINTER MEETINGS",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            dedup_by_text: true,
        }
    }
}

pub struct TranscriptFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
    dedup_by_text: bool,
}

impl TranscriptFilter {
    pub fn new(config: &FilterConfig) -> Result<Self> {
        Ok(Self {
            include: Self::alternation(&config.include_events, true)?,
            exclude: Self::alternation(&config.exclude_events, false)?,
            dedup_by_text: config.dedup_by_text,
        })
    }

    fn alternation(patterns: &[String], case_insensitive: bool) -> Result<Option<Regex>> {
        if patterns.is_empty() {
            return Ok(None);
        }
        let joined = patterns.join("|");
        let regex = RegexBuilder::new(&joined)
            .case_insensitive(case_insensitive)
            .build()
            .context(format!("Invalid event pattern: {}", joined))?;
        Ok(Some(regex))
    }

    pub fn keeps_event(&self, event: &str) -> bool {
        let included = self.include.as_ref().is_none_or(|re| re.is_match(event));
        let excluded = self.exclude.as_ref().is_some_and(|re| re.is_match(event));
        included && !excluded
    }

    /// Dedup first (keeping the first copy), then filter by event.
    pub fn apply(&self, transcripts: Vec<Transcript>) -> Vec<Transcript> {
        let total = transcripts.len();
        let mut seen = HashSet::new();

        let kept: Vec<Transcript> = transcripts
            .into_iter()
            .filter(|t| !self.dedup_by_text || seen.insert(t.content_id()))
            .filter(|t| self.keeps_event(&t.event))
            .collect();

        info!(total, kept = kept.len(), "filtered transcripts");
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(text: &str, event: &str) -> Transcript {
        Transcript::new(text.to_string(), event.to_string(), "D".to_string(), vec![])
    }

    #[test]
    fn test_default_keeps_every_event() {
        let filter = TranscriptFilter::new(&FilterConfig::default()).unwrap();
        let kept = filter.apply(vec![transcript("a", "X"), transcript("b", "Y"), transcript("a", "Z")]);
        assert_eq!(kept.len(), 2);

        let filter = TranscriptFilter::new(&FilterConfig {
            dedup_by_text: false,
            ..Default::default()
        })
        .unwrap();
        let kept = filter.apply(vec![transcript("a", "X"), transcript("a", "Y")]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_mlb_preset() {
        let filter = TranscriptFilter::new(&FilterConfig::mlb()).unwrap();

        assert!(filter.keeps_event("2023 World Series: Rangers vs Diamondbacks"));
        assert!(filter.keeps_event("NL DIVISION SERIES: PHILLIES VS BRAVES"));
        assert!(!filter.keeps_event("NCAA MEN'S COLLEGE WORLD SERIES"));
        assert!(!filter.keeps_event("MLB WINTER MEETINGS"));
        assert!(!filter.keeps_event("NBA FINALS"));
    }

    #[test]
    fn test_dedup_keeps_first_copy() {
        let filter = TranscriptFilter::new(&FilterConfig::default()).unwrap();

        let kept = filter.apply(vec![
            transcript("same", "FIRST"),
            transcript("other", "X"),
            transcript("same", "SECOND"),
        ]);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].event, "FIRST");
        assert_eq!(kept[1].event, "X");
    }

    #[test]
    fn test_invalid_pattern() {
        let config = FilterConfig {
            include_events: vec!["(".to_string()],
            ..Default::default()
        };
        assert!(TranscriptFilter::new(&config).is_err());
    }
}
