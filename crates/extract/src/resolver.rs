use crate::error::{ExtractError, Result};

/// Best candidate for a label and how far it was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub name: &'a str,
    pub distance: usize,
}

/// Maps noisy speaker labels ("J SMITH", "JOHN SMTIH") onto the candidate
/// names scraped for the transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameResolver {
    /// Labels further than this from every candidate stay unresolved
    max_distance: Option<usize>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_distance(max_distance: Option<usize>) -> Self {
        Self { max_distance }
    }

    /// Closest candidate by case-insensitive Levenshtein distance. Ties go
    /// to the earliest candidate.
    pub fn closest<'a, S: AsRef<str>>(&self, label: &str, candidates: &'a [S]) -> Result<Resolution<'a>> {
        let label = label.to_lowercase();
        let mut best: Option<Resolution<'a>> = None;

        for candidate in candidates {
            let name = candidate.as_ref();
            let distance = strsim::levenshtein(&label, &name.to_lowercase());
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Resolution { name, distance });
            }
        }

        best.ok_or_else(|| {
            ExtractError::InvalidArgument(format!("no candidate names to resolve {:?} against", label))
        })
    }

    /// Canonical name for `label`, or `None` if a cutoff is set and every
    /// candidate is beyond it.
    pub fn resolve<'a, S: AsRef<str>>(&self, label: &str, candidates: &'a [S]) -> Result<Option<&'a str>> {
        let resolution = self.closest(label, candidates)?;
        match self.max_distance {
            Some(max) if resolution.distance > max => Ok(None),
            _ => Ok(Some(resolution.name)),
        }
    }
}
