pub mod biography;
pub mod inference;
pub mod table;

pub use biography::BiographyMap;
pub use inference::{InferenceConfig, NationalityInferencer};
pub use table::{DuplicatePolicy, NationalityTable};

use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

/// Person name -> inferred country, built once before attribution starts
/// and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NationalityMap {
    nationalities: HashMap<String, Option<String>>,
}

impl NationalityMap {
    /// Infer a nationality for every name. `parallel` fans out across names
    /// with rayon; the result does not depend on it.
    pub fn build(
        names: &[String],
        biographies: &BiographyMap,
        inferencer: &NationalityInferencer,
        parallel: bool,
    ) -> Self {
        let infer_one = |name: &String| {
            let nationality = inferencer.infer(biographies.get(name)).map(str::to_string);
            debug!(name = %name, nationality = ?nationality, "inferred nationality");
            (name.clone(), nationality)
        };

        let nationalities: HashMap<String, Option<String>> = if parallel {
            names.par_iter().map(infer_one).collect()
        } else {
            names.iter().map(infer_one).collect()
        };

        let map = Self { nationalities };
        info!(names = map.len(), resolved = map.resolved_count(), "built nationality map");
        map
    }

    pub fn insert(&mut self, name: impl Into<String>, nationality: Option<String>) {
        self.nationalities.insert(name.into(), nationality);
    }

    /// Country for `name`; unknown names and unresolved ones both give `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.nationalities.get(name).and_then(|n| n.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nationalities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nationalities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nationalities.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.nationalities.values().filter(|n| n.is_some()).count()
    }
}

impl<N: Into<String>> FromIterator<(N, Option<String>)> for NationalityMap {
    fn from_iter<T: IntoIterator<Item = (N, Option<String>)>>(iter: T) -> Self {
        let mut map = Self::default();
        for (name, nationality) in iter {
            map.insert(name, nationality);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<String>, BiographyMap, NationalityInferencer) {
        let table = NationalityTable::from_pairs(
            vec![("United States", "American"), ("Japan", "Japanese"), ("Venezuela", "Venezuelan")],
            DuplicatePolicy::Reject,
        )
        .unwrap();
        let inferencer = NationalityInferencer::new(table, &InferenceConfig::default()).unwrap();

        let biographies: BiographyMap = vec![
            ("Aaron Judge", Some("Aaron James Judge (born April 26, 1992) is an American baseball outfielder.".to_string())),
            ("Shohei Ohtani", Some("Shohei Ohtani (born July 5, 1994) is a Japanese baseball player.".to_string())),
            ("Jose Altuve", Some("None".to_string())),
        ]
        .into_iter()
        .collect();

        let names = vec![
            "Aaron Judge".to_string(),
            "Shohei Ohtani".to_string(),
            "Jose Altuve".to_string(),
            "Never Looked Up".to_string(),
        ];
        (names, biographies, inferencer)
    }

    #[test]
    fn test_build_map() {
        let (names, biographies, inferencer) = fixture();
        let map = NationalityMap::build(&names, &biographies, &inferencer, false);

        assert_eq!(map.len(), 4);
        assert_eq!(map.get("Aaron Judge"), Some("United States"));
        assert_eq!(map.get("Shohei Ohtani"), Some("Japan"));
        assert_eq!(map.get("Jose Altuve"), None);
        assert!(map.contains("Never Looked Up"));
        assert_eq!(map.resolved_count(), 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (names, biographies, inferencer) = fixture();
        let sequential = NationalityMap::build(&names, &biographies, &inferencer, false);
        let parallel = NationalityMap::build(&names, &biographies, &inferencer, true);
        assert_eq!(sequential, parallel);
    }
}
