use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// What to do when the reference file lists the same adjectival twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    FirstWins,
    /// Later rows overwrite the country, the adjectival keeps its first slot
    #[default]
    LastWins,
    Reject,
}

/// Adjectival word -> country name, e.g. `Dominican -> Dominican Republic`.
///
/// Keys are case-sensitive surface forms. Iteration follows the order in
/// which each adjectival first appeared, which is also the precedence order
/// used when matching biographies.
#[derive(Debug, Clone, Default)]
pub struct NationalityTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NationalityTable {
    /// Build from `(country, adjectival)` pairs, both trimmed.
    pub fn from_pairs<I, C, A>(pairs: I, policy: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (C, A)>,
        C: AsRef<str>,
        A: AsRef<str>,
    {
        let mut table = Self::default();

        for (country, adjectival) in pairs {
            let country = country.as_ref().trim();
            let adjectival = adjectival.as_ref().trim();

            if adjectival.is_empty() {
                warn!(country, "skipping row without adjectival");
                continue;
            }

            match table.index.get(adjectival) {
                None => {
                    table.index.insert(adjectival.to_string(), table.entries.len());
                    table.entries.push((adjectival.to_string(), country.to_string()));
                }
                Some(&slot) => {
                    let previous = &table.entries[slot].1;
                    match policy {
                        DuplicatePolicy::Reject => anyhow::bail!(
                            "Duplicate adjectival {:?} ({} and {})",
                            adjectival,
                            previous,
                            country
                        ),
                        DuplicatePolicy::FirstWins => {
                            warn!(adjectival, kept = %previous, ignored = country, "duplicate adjectival");
                        }
                        DuplicatePolicy::LastWins => {
                            warn!(adjectival, replaced = %previous, kept = country, "duplicate adjectival");
                            table.entries[slot].1 = country.to_string();
                        }
                    }
                }
            }
        }

        Ok(table)
    }

    /// Read a two-column `country,adjectival` CSV with a header row.
    pub fn from_reader<R: Read>(reader: R, policy: DuplicatePolicy) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut pairs = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record.context(format!("Invalid nationality row {}", i + 1))?;
            match (record.get(0), record.get(1)) {
                (Some(country), Some(adjectival)) => {
                    pairs.push((country.to_string(), adjectival.to_string()))
                }
                _ => warn!(row = i + 1, "nationality row has fewer than two columns"),
            }
        }

        Self::from_pairs(pairs, policy)
    }

    pub fn from_csv_path(path: &Path, policy: DuplicatePolicy) -> Result<Self> {
        let file = std::fs::File::open(path)
            .context(format!("Failed to open nationality table: {:?}", path))?;
        let table = Self::from_reader(file, policy)
            .context(format!("Failed to load nationality table: {:?}", path))?;
        info!(file = %path.display(), adjectivals = table.len(), "loaded nationality table");
        Ok(table)
    }

    pub fn get(&self, adjectival: &str) -> Option<&str> {
        self.index
            .get(adjectival)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Adjectivals in precedence order
    pub fn adjectivals(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(adjectival, _)| adjectival.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
