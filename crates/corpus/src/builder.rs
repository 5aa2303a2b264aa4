use anyhow::{Context, Result};
use extract::{AttributedRecord, ExtractError, SpeakerAttributor, attribute_block};
use ingest::{Transcript, TranscriptFilter, TranscriptSegmenter, distinct_events, distinct_names};
use nationality::{BiographyMap, NationalityInferencer, NationalityMap, NationalityTable};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::CorpusConfig;
use crate::metrics::{BuildMetrics, BuildStats, TimedOperation};

/// Output of one corpus build
#[derive(Debug, Clone)]
pub struct Corpus {
    pub records: Vec<AttributedRecord>,
    /// Candidate names across the kept transcripts, first-seen order
    pub names: Vec<String>,
    pub events: Vec<String>,
    pub nationalities: NationalityMap,
    pub stats: BuildStats,
}

/// Drives segmentation and attribution over every transcript.
///
/// Nationalities for all candidate names are inferred before any transcript
/// is attributed, and the resulting map is passed down read-only.
pub struct CorpusBuilder {
    config: CorpusConfig,
    filter: TranscriptFilter,
    segmenter: TranscriptSegmenter,
    attributor: SpeakerAttributor,
    metrics: BuildMetrics,
}

impl CorpusBuilder {
    pub fn new(config: CorpusConfig) -> Result<Self> {
        let filter = TranscriptFilter::new(&config.filter)?;
        let segmenter = TranscriptSegmenter::new(config.segmenter.clone());
        let attributor = SpeakerAttributor::new(config.attributor_config());

        Ok(Self {
            config,
            filter,
            segmenter,
            attributor,
            metrics: BuildMetrics::new(),
        })
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Counters accumulated over this builder's lifetime
    pub fn stats(&self) -> BuildStats {
        self.metrics.snapshot()
    }

    /// Compile the biography matcher for `table` with this build's settings.
    pub fn inferencer(&self, table: NationalityTable) -> Result<NationalityInferencer> {
        NationalityInferencer::new(table, &self.config.nationality.inference)
    }

    /// Full batch: filter, infer nationalities, then attribute.
    pub fn build(
        &self,
        transcripts: Vec<Transcript>,
        biographies: &BiographyMap,
        inferencer: &NationalityInferencer,
    ) -> Result<Corpus> {
        let transcripts = self.filter.apply(transcripts);
        let names = distinct_names(&transcripts);
        let events = distinct_events(&transcripts);

        let missing = names.iter().filter(|name| !biographies.contains(name)).count();
        if missing > 0 {
            warn!(missing, "candidate names without a biography entry");
        }

        let nationalities = self.build_nationalities(&names, biographies, inferencer);
        let records = self.attribute_all(&transcripts, &nationalities)?;

        let stats = self.metrics.snapshot();
        info!(
            transcripts = stats.transcripts,
            blocks = stats.blocks,
            records = records.len(),
            chunks_skipped = stats.chunks_skipped,
            "corpus built"
        );

        Ok(Corpus {
            records,
            names,
            events,
            nationalities,
            stats,
        })
    }

    pub fn build_nationalities(
        &self,
        names: &[String],
        biographies: &BiographyMap,
        inferencer: &NationalityInferencer,
    ) -> NationalityMap {
        let timer = TimedOperation::start();
        let nationalities = NationalityMap::build(names, biographies, inferencer, self.config.parallel);
        self.metrics
            .record_nationalities(nationalities.len(), nationalities.resolved_count(), timer.elapsed());
        nationalities
    }

    /// Records for every transcript, in input order regardless of `parallel`.
    pub fn attribute_all(
        &self,
        transcripts: &[Transcript],
        nationalities: &NationalityMap,
    ) -> Result<Vec<AttributedRecord>> {
        let timer = TimedOperation::start();

        let per_transcript: Vec<Vec<AttributedRecord>> = if self.config.parallel {
            transcripts
                .par_iter()
                .map(|t| self.attribute_transcript(t, nationalities))
                .collect::<Result<_>>()?
        } else {
            transcripts
                .iter()
                .map(|t| self.attribute_transcript(t, nationalities))
                .collect::<Result<_>>()?
        };

        self.metrics.record_attribution(timer.elapsed());
        Ok(per_transcript.into_iter().flatten().collect())
    }

    /// Segment one transcript and attribute each block. Malformed chunks are
    /// skipped; an empty candidate list aborts with the transcript named.
    pub fn attribute_transcript(
        &self,
        transcript: &Transcript,
        nationalities: &NationalityMap,
    ) -> Result<Vec<AttributedRecord>> {
        let blocks = self.segmenter.segment(&transcript.text);
        self.metrics.record_transcript(blocks.len());

        if blocks.is_empty() {
            debug!(event = %transcript.event, date = %transcript.date, "no question blocks");
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for block in &blocks {
            let results = attribute_block(
                &self.attributor,
                &block.text,
                &transcript.event,
                &transcript.date,
                &transcript.candidate_names,
                nationalities,
            );

            for result in results {
                match result {
                    Ok(Some(record)) => {
                        if self.config.output.require_nationality && record.nationality.is_none() {
                            self.metrics.record_missing_nationality();
                            continue;
                        }
                        records.push(record);
                    }
                    Ok(None) => {
                        self.metrics.record_unresolved_speaker();
                        debug!(event = %transcript.event, block = block.index, "speaker label left unresolved");
                    }
                    Err(e @ ExtractError::Attribution { .. }) => {
                        self.metrics.record_skipped_chunk();
                        warn!(event = %transcript.event, block = block.index, error = %e, "skipping answer chunk");
                    }
                    Err(e) => {
                        return Err(e).with_context(|| {
                            format!(
                                "Transcript {} ({}, {}) cannot be attributed",
                                transcript.content_id(),
                                transcript.event,
                                transcript.date
                            )
                        });
                    }
                }
            }
        }

        self.metrics.record_emitted(records.len());
        Ok(records)
    }
}
