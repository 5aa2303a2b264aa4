pub mod filter;
pub mod reader;
pub mod segmenter;
pub mod transcript;

pub use filter::{FilterConfig, TranscriptFilter};
pub use reader::{TranscriptReader, parse_name_list};
pub use segmenter::{QUESTION_MARKER, SegmenterConfig, TranscriptSegmenter};
pub use transcript::{QuestionBlock, Transcript};

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Load transcripts from a single file
pub async fn ingest_file(file_path: &Path) -> Result<Vec<Transcript>> {
    let transcripts = TranscriptReader::read_file(file_path).await?;
    info!(file = %file_path.display(), transcripts = transcripts.len(), "ingested file");
    Ok(transcripts)
}

/// Ingest entire directory
pub async fn ingest_directory(dir_path: &Path) -> Result<Vec<Transcript>> {
    let files = TranscriptReader::read_directory(dir_path).await?;

    let mut all_transcripts = Vec::new();
    for (_, transcripts) in files {
        all_transcripts.extend(transcripts);
    }

    info!(dir = %dir_path.display(), transcripts = all_transcripts.len(), "ingested directory");
    Ok(all_transcripts)
}

/// Ingest a file or a directory, whichever `path` is
pub async fn ingest_path(path: &Path) -> Result<Vec<Transcript>> {
    if path.is_dir() {
        ingest_directory(path).await
    } else {
        ingest_file(path).await
    }
}

/// Every candidate name across all transcripts, first-seen order
pub fn distinct_names(transcripts: &[Transcript]) -> Vec<String> {
    let mut seen = HashSet::new();
    transcripts
        .iter()
        .flat_map(|t| t.candidate_names.iter())
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

/// Every event across all transcripts, first-seen order
pub fn distinct_events(transcripts: &[Transcript]) -> Vec<String> {
    let mut seen = HashSet::new();
    transcripts
        .iter()
        .map(|t| &t.event)
        .filter(|event| seen.insert(event.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_names_and_events() {
        let transcripts = vec![
            Transcript::new("a".into(), "ALCS".into(), "D".into(), vec!["B".into(), "A".into()]),
            Transcript::new("b".into(), "NLCS".into(), "D".into(), vec!["A".into(), "C".into()]),
            Transcript::new("c".into(), "ALCS".into(), "D".into(), vec![]),
        ];

        assert_eq!(distinct_names(&transcripts), vec!["B", "A", "C"]);
        assert_eq!(distinct_events(&transcripts), vec!["ALCS", "NLCS"]);
    }
}
