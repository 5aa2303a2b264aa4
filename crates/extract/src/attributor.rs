use nationality::NationalityMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::resolver::NameResolver;
use crate::schema::Attribution;

/// Speaker label at the start of a line: `\nJOHN SMITH:`
static LINE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[A-ZÀ-Ÿ ,.-]+:").unwrap());

/// Speaker label after any whitespace, for scrapes that lost their line breaks
static INLINE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s([A-ZÀ-Ÿ][A-ZÀ-Ÿ ,.-]*):").unwrap());

/// First label inside an answer chunk
static CHUNK_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-ZÀ-Ÿ ,.-]+):").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributorConfig {
    pub question_marker: String,
    /// Cutoff for fuzzy label matching; `None` always takes the best guess
    pub max_label_distance: Option<usize>,
    /// Accept labels that do not start a line when a block has no line-start label
    pub inline_label_fallback: bool,
}

impl Default for AttributorConfig {
    fn default() -> Self {
        Self {
            question_marker: "Q.".to_string(),
            max_label_distance: None,
            inline_label_fallback: true,
        }
    }
}

/// Splits a question block into its question and the answers that follow,
/// one per speaker label.
pub struct SpeakerAttributor {
    resolver: NameResolver,
    config: AttributorConfig,
}

impl SpeakerAttributor {
    pub fn new(config: AttributorConfig) -> Self {
        Self {
            resolver: NameResolver::with_max_distance(config.max_label_distance),
            config,
        }
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// One result per answer chunk, in transcript order.
    ///
    /// A block without any speaker label produces no results. A chunk whose
    /// label cannot be found is an `Attribution` error for that chunk only;
    /// an empty candidate list is `InvalidArgument`.
    pub fn attribute<S: AsRef<str>>(
        &self,
        block: &str,
        candidates: &[S],
        nationalities: &NationalityMap,
    ) -> Vec<Result<Attribution>> {
        let segments = self.split(block);
        let Some((question, answers)) = segments.split_first() else {
            return Vec::new();
        };
        let question = self.clean_question(question);

        debug!(answers = answers.len(), "attributing question block");

        answers
            .iter()
            .map(|chunk| self.attribute_chunk(&question, chunk, candidates, nationalities))
            .collect()
    }

    fn attribute_chunk<S: AsRef<str>>(
        &self,
        question: &str,
        chunk: &str,
        candidates: &[S],
        nationalities: &NationalityMap,
    ) -> Result<Attribution> {
        let caps = CHUNK_LABEL
            .captures(chunk)
            .ok_or_else(|| ExtractError::attribution(chunk))?;
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            return Err(ExtractError::attribution(chunk));
        };

        let label = label.as_str().trim();
        if label.is_empty() {
            return Err(ExtractError::attribution(chunk));
        }

        let speaker = self.resolver.resolve(label, candidates)?.map(str::to_string);
        let nationality = speaker
            .as_deref()
            .and_then(|name| nationalities.get(name))
            .map(str::to_string);

        let answer = format!("{}{}", &chunk[..whole.start()], &chunk[whole.end()..])
            .trim()
            .to_string();

        Ok(Attribution {
            question: question.to_string(),
            answer,
            label: label.to_string(),
            speaker,
            nationality,
        })
    }

    /// Cut the block at every speaker label; the first piece is the question.
    fn split<'b>(&self, block: &'b str) -> Vec<&'b str> {
        // (end of the piece before the label, start of the labelled piece)
        let mut cuts: Vec<(usize, usize)> = LINE_LABEL
            .find_iter(block)
            .map(|m| (m.start(), m.start() + 1))
            .collect();

        if cuts.is_empty() && self.config.inline_label_fallback {
            cuts = INLINE_LABEL
                .captures_iter(block)
                .filter_map(|caps| caps.get(1))
                .map(|label| (label.start(), label.start()))
                .collect();
        }

        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut start = 0;
        for (end, next) in cuts {
            pieces.push(&block[start..end]);
            start = next;
        }
        pieces.push(&block[start..]);
        pieces
    }

    fn clean_question(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        trimmed
            .strip_prefix(self.config.question_marker.as_str())
            .unwrap_or(trimmed)
            .trim()
            .to_string()
    }
}

impl Default for SpeakerAttributor {
    fn default() -> Self {
        Self::new(AttributorConfig::default())
    }
}
