use anyhow::{Context, Result};
use extract::AttributedRecord;
use nationality::NationalityMap;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::metrics::BuildStats;

#[derive(Serialize)]
struct NationalityRow<'a> {
    name: &'a str,
    nationality: Option<&'a str>,
}

/// `question,answer,event,date,name,nationality`; a missing nationality is an empty cell.
pub fn write_records_csv<W: Write>(writer: W, records: &[AttributedRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// `name,nationality`, one row per name in the given order.
pub fn write_nationalities_csv<W: Write>(
    writer: W,
    names: &[String],
    nationalities: &NationalityMap,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for name in names {
        csv_writer.serialize(NationalityRow {
            name,
            nationality: nationalities.get(name),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// One event per line, no header.
pub fn write_events_csv<W: Write>(writer: W, events: &[String]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for event in events {
        csv_writer.write_record([event])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {:?}", parent))?;
    }
    File::create(path).context(format!("Failed to create file: {:?}", path))
}

pub fn save_records(path: &Path, records: &[AttributedRecord]) -> Result<()> {
    write_records_csv(create(path)?, records)
        .context(format!("Failed to write corpus: {:?}", path))?;
    info!(file = %path.display(), records = records.len(), "saved corpus");
    Ok(())
}

pub fn save_nationalities(path: &Path, names: &[String], nationalities: &NationalityMap) -> Result<()> {
    write_nationalities_csv(create(path)?, names, nationalities)
        .context(format!("Failed to write nationalities: {:?}", path))?;
    info!(file = %path.display(), names = names.len(), "saved nationalities");
    Ok(())
}

pub fn save_events(path: &Path, events: &[String]) -> Result<()> {
    write_events_csv(create(path)?, events)
        .context(format!("Failed to write events: {:?}", path))?;
    info!(file = %path.display(), events = events.len(), "saved events");
    Ok(())
}

pub fn save_stats(path: &Path, stats: &BuildStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    create(path)?
        .write_all(json.as_bytes())
        .context(format!("Failed to write stats: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(nationality: Option<&str>) -> AttributedRecord {
        AttributedRecord {
            question: "How did it feel, \"finally\"?".to_string(),
            answer: "Great.\nReally great.".to_string(),
            event: "WORLD SERIES".to_string(),
            date: "October 30, 2024".to_string(),
            speaker: "Walker Buehler".to_string(),
            nationality: nationality.map(str::to_string),
        }
    }

    #[test]
    fn test_records_csv_layout() {
        let mut buffer = Vec::new();
        write_records_csv(&mut buffer, &[record(Some("United States")), record(None)]).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("question,answer,event,date,name,nationality"));

        let mut reader = csv::Reader::from_reader(output.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "How did it feel, \"finally\"?");
        assert_eq!(&rows[0][1], "Great.\nReally great.");
        assert_eq!(&rows[0][4], "Walker Buehler");
        assert_eq!(&rows[0][5], "United States");
        assert_eq!(&rows[1][5], "");
    }

    #[test]
    fn test_nationalities_csv_follows_name_order() {
        let nationalities: NationalityMap = vec![
            ("Shohei Ohtani", Some("Japan".to_string())),
            ("Freddie Freeman", None),
        ]
        .into_iter()
        .collect();
        let names = vec!["Freddie Freeman".to_string(), "Shohei Ohtani".to_string()];

        let mut buffer = Vec::new();
        write_nationalities_csv(&mut buffer, &names, &nationalities).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "name,nationality\nFreddie Freeman,\nShohei Ohtani,Japan\n"
        );
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("sportsQnA.csv");
        save_records(&path, &[record(None)]).unwrap();
        assert!(path.is_file());

        let events = dir.path().join("events.csv");
        save_events(&events, &["WORLD SERIES".to_string(), "NLCS".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&events).unwrap(), "WORLD SERIES\nNLCS\n");

        let stats = dir.path().join("stats.json");
        save_stats(&stats, &BuildStats::default()).unwrap();
        assert!(std::fs::read_to_string(&stats).unwrap().contains("\"records_emitted\": 0"));
    }
}
