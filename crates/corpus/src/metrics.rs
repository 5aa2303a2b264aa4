use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Counters for one corpus build. Shared by reference across rayon workers.
#[derive(Debug, Default)]
pub struct BuildMetrics {
    transcripts: AtomicUsize,
    transcripts_without_blocks: AtomicUsize,
    blocks: AtomicUsize,
    chunks_skipped: AtomicUsize,
    unresolved_speakers: AtomicUsize,
    records_emitted: AtomicUsize,
    records_missing_nationality: AtomicUsize,
    names: AtomicUsize,
    names_with_nationality: AtomicUsize,

    // Timing (in microseconds)
    nationality_time_us: AtomicU64,
    attribution_time_us: AtomicU64,
}

impl BuildMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_transcript(&self, blocks: usize) {
        self.transcripts.fetch_add(1, Ordering::Relaxed);
        self.blocks.fetch_add(blocks, Ordering::Relaxed);
        if blocks == 0 {
            self.transcripts_without_blocks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_skipped_chunk(&self) {
        self.chunks_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unresolved_speaker(&self) {
        self.unresolved_speakers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_emitted(&self, records: usize) {
        self.records_emitted.fetch_add(records, Ordering::Relaxed);
    }

    pub fn record_missing_nationality(&self) {
        self.records_missing_nationality.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_nationalities(&self, names: usize, resolved: usize, duration: Duration) {
        self.names.fetch_add(names, Ordering::Relaxed);
        self.names_with_nationality.fetch_add(resolved, Ordering::Relaxed);
        self.nationality_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_attribution(&self, duration: Duration) {
        self.attribution_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> BuildStats {
        BuildStats {
            transcripts: self.transcripts.load(Ordering::Relaxed),
            transcripts_without_blocks: self.transcripts_without_blocks.load(Ordering::Relaxed),
            blocks: self.blocks.load(Ordering::Relaxed),
            chunks_skipped: self.chunks_skipped.load(Ordering::Relaxed),
            unresolved_speakers: self.unresolved_speakers.load(Ordering::Relaxed),
            records_emitted: self.records_emitted.load(Ordering::Relaxed),
            records_missing_nationality: self.records_missing_nationality.load(Ordering::Relaxed),
            names: self.names.load(Ordering::Relaxed),
            names_with_nationality: self.names_with_nationality.load(Ordering::Relaxed),
            nationality_time_ms: self.nationality_time_us.load(Ordering::Relaxed) as f64 / 1000.0,
            attribution_time_ms: self.attribution_time_us.load(Ordering::Relaxed) as f64 / 1000.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildStats {
    pub transcripts: usize,
    pub transcripts_without_blocks: usize,
    pub blocks: usize,
    pub chunks_skipped: usize,
    pub unresolved_speakers: usize,
    pub records_emitted: usize,
    /// Dropped because `require_nationality` was set
    pub records_missing_nationality: usize,
    pub names: usize,
    pub names_with_nationality: usize,
    pub nationality_time_ms: f64,
    pub attribution_time_ms: f64,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
