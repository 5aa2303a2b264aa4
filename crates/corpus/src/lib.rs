pub mod builder;
pub mod config;
pub mod export;
pub mod metrics;

pub use builder::{Corpus, CorpusBuilder};
pub use config::{CorpusConfig, NationalityConfig, OutputConfig};
pub use export::{save_events, save_nationalities, save_records, save_stats};
pub use metrics::{BuildMetrics, BuildStats};
