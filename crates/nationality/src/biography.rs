use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Cells the lookup layer writes when it found no biography.
const ABSENT_MARKERS: &[&str] = &["", "None", "none", "NaN", "nan", "NULL", "null", "N/A", "n/a", "NA"];

/// Person name -> biography text, or absence when the lookup found nothing.
#[derive(Debug, Clone, Default)]
pub struct BiographyMap {
    entries: HashMap<String, Option<String>>,
}

impl BiographyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, biography: Option<String>) {
        let biography = biography.filter(|text| !is_absent(text));
        self.entries.insert(name.into(), biography);
    }

    /// Biography text for `name`; `None` both for absent biographies and
    /// for names never looked up.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|b| b.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a `name,summary` CSV with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut map = Self::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record.context(format!("Invalid biography row {}", i + 1))?;
            let Some(name) = record.get(0) else { continue };
            map.insert(name, record.get(1).map(str::to_string));
        }
        Ok(map)
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .context(format!("Failed to open biographies: {:?}", path))?;
        let map = Self::from_reader(file)
            .context(format!("Failed to load biographies: {:?}", path))?;
        info!(file = %path.display(), names = map.len(), "loaded biographies");
        Ok(map)
    }
}

impl<N: Into<String>> FromIterator<(N, Option<String>)> for BiographyMap {
    fn from_iter<T: IntoIterator<Item = (N, Option<String>)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, biography) in iter {
            map.insert(name, biography);
        }
        map
    }
}

fn is_absent(text: &str) -> bool {
    ABSENT_MARKERS.contains(&text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_markers() {
        let csv = "name,summary\n\
            Aaron Judge,\"Aaron James Judge (born April 26, 1992) is an American baseball player.\"\n\
            Nobody,None\n\
            Blank,\n";
        let map = BiographyMap::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(map.len(), 3);
        assert!(map.get("Aaron Judge").unwrap().contains("American"));
        assert_eq!(map.get("Nobody"), None);
        assert_eq!(map.get("Blank"), None);
        assert!(map.contains("Nobody"));
        assert!(!map.contains("Unknown"));
    }

    #[test]
    fn test_collect() {
        let map: BiographyMap = vec![("A", Some("text".to_string())), ("B", Some("nan".to_string()))]
            .into_iter()
            .collect();
        assert_eq!(map.get("A"), Some("text"));
        assert_eq!(map.get("B"), None);
    }
}
