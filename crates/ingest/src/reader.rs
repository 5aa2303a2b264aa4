use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::transcript::Transcript;

pub struct TranscriptReader;

/// Row shape of a scraped `interviews_raw.csv`
#[derive(Debug, Deserialize)]
struct CsvRow {
    text: String,
    event: String,
    date: String,
    names: String,
}

impl TranscriptReader {
    pub async fn read_file(path: &Path) -> Result<Vec<Transcript>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let content = match extension {
            "json" | "jsonl" | "csv" => fs::read_to_string(path)
                .await
                .context(format!("Failed to read file: {:?}", path))?,
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        };

        let transcripts = match extension {
            "json" => serde_json::from_str(&content)
                .context(format!("Failed to parse transcripts in {:?}", path))?,
            "jsonl" => Self::parse_jsonl(&content)
                .context(format!("Failed to parse transcripts in {:?}", path))?,
            _ => Self::parse_csv(&content)
                .context(format!("Failed to parse transcripts in {:?}", path))?,
        };

        Ok(transcripts)
    }

    /// Read every supported file under `dir`, recursively, in file-name order.
    pub async fn read_directory(dir: &Path) -> Result<Vec<(String, Vec<Transcript>)>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.context(format!("Failed to walk directory: {:?}", dir))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            match path.extension().and_then(|e| e.to_str()) {
                Some("json" | "jsonl" | "csv") => {
                    let transcripts = Self::read_file(path).await?;
                    debug!(file = %path.display(), transcripts = transcripts.len(), "read transcripts");
                    files.push((path.to_string_lossy().to_string(), transcripts));
                }
                _ => debug!(file = %path.display(), "skipping unsupported file"),
            }
        }

        Ok(files)
    }

    fn parse_jsonl(content: &str) -> Result<Vec<Transcript>> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).context(format!("Invalid transcript on line {}", i + 1))
            })
            .collect()
    }

    fn parse_csv(content: &str) -> Result<Vec<Transcript>> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut transcripts = Vec::new();

        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.context(format!("Invalid transcript row {}", i + 1))?;
            let names = match parse_name_list(&row.names) {
                Some(names) => names,
                None => {
                    warn!(row = i + 1, names = %row.names, "unparseable names column, using no candidates");
                    Vec::new()
                }
            };
            transcripts.push(Transcript::new(row.text, row.event, row.date, names));
        }

        Ok(transcripts)
    }
}

/// Parse a list of names stored as a JSON array or as a Python list literal
/// (`['A', "O'Neil"]`), the two shapes a names column shows up in.
pub fn parse_name_list(raw: &str) -> Option<Vec<String>> {
    let raw = raw.trim();
    if let Ok(names) = serde_json::from_str::<Vec<String>>(raw) {
        return Some(names);
    }

    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    let mut names = Vec::new();
    let mut chars = inner.chars();

    loop {
        // Skip separators up to the next opening quote
        let quote = loop {
            match chars.next() {
                None => return Some(names),
                Some(c) if c == ',' || c.is_whitespace() => continue,
                Some(c @ ('\'' | '"')) => break c,
                Some(_) => return None,
            }
        };

        let mut name = String::new();
        loop {
            match chars.next()? {
                '\\' => name.push(chars.next()?),
                c if c == quote => break,
                c => name.push(c),
            }
        }
        names.push(name);
    }
}
