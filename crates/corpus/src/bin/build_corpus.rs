use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use corpus::{CorpusBuilder, CorpusConfig, save_events, save_nationalities, save_records, save_stats};
use nationality::{BiographyMap, NationalityTable};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    Mlb,
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Build a question/answer corpus from scraped interview transcripts"
)]
struct Args {
    /// Transcript file (.json, .jsonl, .csv) or directory of them
    #[arg(short, long)]
    transcripts: PathBuf,
    /// `name,summary` CSV of biographies
    #[arg(short, long)]
    biographies: PathBuf,
    /// `country,adjectival` CSV
    #[arg(short, long)]
    nationality_table: PathBuf,
    /// JSON config; overrides the preset
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "default")]
    preset: Preset,
    #[arg(short, long, default_value = "data/sportsQnA.csv")]
    output: PathBuf,
    #[arg(long)]
    nationalities_out: Option<PathBuf>,
    #[arg(long)]
    events_out: Option<PathBuf>,
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CorpusConfig::from_file(path)?,
        None => match args.preset {
            Preset::Default => CorpusConfig::default(),
            Preset::Mlb => CorpusConfig::mlb(),
        },
    };
    info!(parallel = config.parallel, "starting corpus build");

    // Reference data must be complete before any transcript is attributed
    let table = NationalityTable::from_csv_path(&args.nationality_table, config.nationality.duplicate_policy)?;
    let biographies = BiographyMap::from_csv_path(&args.biographies)?;

    let transcripts = ingest::ingest_path(&args.transcripts)
        .await
        .context(format!("Failed to load transcripts from {:?}", args.transcripts))?;

    let builder = CorpusBuilder::new(config)?;
    let inferencer = builder.inferencer(table)?;
    let corpus = builder.build(transcripts, &biographies, &inferencer)?;

    save_records(&args.output, &corpus.records)?;
    if let Some(path) = &args.nationalities_out {
        save_nationalities(path, &corpus.names, &corpus.nationalities)?;
    }
    if let Some(path) = &args.events_out {
        save_events(path, &corpus.events)?;
    }
    if let Some(path) = &args.stats_out {
        save_stats(path, &corpus.stats)?;
    }

    println!("\n=== CORPUS ===\n");
    println!("  Transcripts: {}", corpus.stats.transcripts);
    println!("  Question blocks: {}", corpus.stats.blocks);
    println!("  Records: {}", corpus.records.len());
    println!("  Skipped chunks: {}", corpus.stats.chunks_skipped);
    println!(
        "  Names with nationality: {}/{}",
        corpus.stats.names_with_nationality, corpus.stats.names
    );
    println!("\nCorpus saved to {}", args.output.display());

    Ok(())
}
