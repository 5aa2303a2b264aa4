use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::table::NationalityTable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Require adjectivals to match whole words ("Indian" no longer hits "Indiana")
    pub word_boundaries: bool,
}

/// Guesses a person's nationality from an encyclopedia-style lead sentence.
///
/// The search starts at the first `)`, which normally closes the birth-date
/// parenthetical; adjectivals before it tend to belong to team or place
/// names. The first adjectival found after it wins. When two adjectivals
/// could match at the same position, the one listed first in the table wins.
pub struct NationalityInferencer {
    table: NationalityTable,
    pattern: Option<Regex>,
}

impl NationalityInferencer {
    pub fn new(table: NationalityTable, config: &InferenceConfig) -> Result<Self> {
        let pattern = if table.is_empty() {
            None
        } else {
            let alternation = table
                .adjectivals()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("|");
            let source = if config.word_boundaries {
                format!(r"\b(?:{})\b", alternation)
            } else {
                format!("(?:{})", alternation)
            };
            Some(Regex::new(&source).context("Failed to compile adjectival pattern")?)
        };

        Ok(Self { table, pattern })
    }

    pub fn table(&self) -> &NationalityTable {
        &self.table
    }

    pub fn infer(&self, biography: Option<&str>) -> Option<&str> {
        let biography = biography?;
        let pattern = self.pattern.as_ref()?;
        let anchor = biography.find(')')?;

        let found = pattern.find(&biography[anchor..])?;
        self.table.get(found.as_str())
    }
}
