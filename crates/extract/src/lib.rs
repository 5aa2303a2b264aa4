pub mod attributor;
pub mod error;
pub mod resolver;
pub mod schema;

pub use attributor::{AttributorConfig, SpeakerAttributor};
pub use error::{ExtractError, Result};
pub use resolver::{NameResolver, Resolution};
pub use schema::{AttributedRecord, Attribution};

use nationality::NationalityMap;

/// Attribute one question block and attach transcript metadata.
///
/// Chunks that fail attribution are returned as errors alongside the
/// records so the caller decides whether to skip or abort. Answers whose
/// speaker stays unresolved are left out.
pub fn attribute_block<S: AsRef<str>>(
    attributor: &SpeakerAttributor,
    block: &str,
    event: &str,
    date: &str,
    candidates: &[S],
    nationalities: &NationalityMap,
) -> Vec<Result<Option<AttributedRecord>>> {
    attributor
        .attribute(block, candidates, nationalities)
        .into_iter()
        .map(|result| result.map(|a| AttributedRecord::from_attribution(a, event, date)))
        .collect()
}
