use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use lyrics_stats::analyze::{
    sort_by_title_mentions, sort_by_title_percentage, LyricsAnalyzer, MatchMode,
};
use lyrics_stats::config::AnalyzerConfig;
use lyrics_stats::loader::load_songs;
use lyrics_stats::models::{AnalysisSummary, Song, SongStats};
use lyrics_stats::normalize::SubstitutionOrder;
use lyrics_stats::progress::{
    create_progress_bar, create_spinner, format_duration, log_progress, set_log_only,
};
use lyrics_stats::report::{mentions_table, percentage_table};
use lyrics_stats::safety::validate_output_path;

const PROGRESS_LOG_INTERVAL: u64 = 100;

#[derive(Clone, Copy, ValueEnum)]
enum SortOrder {
    /// Keep document order
    Input,
    /// Most title mentions first
    Mentions,
    /// Highest title-to-lyrics percentage first
    Percentage,
}

#[derive(Parser)]
#[command(name = "lyrics-stats", version)]
#[command(about = "Count how often songs say their own title")]
struct Args {
    /// Lyrics document (JSON array of songs)
    source: PathBuf,

    /// Where to write the stats document (name must contain "stats")
    output: Option<PathBuf>,

    /// Analyzer config file (defaults to ~/.config/lyrics-stats/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows per report table (overrides config)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Number of parallel workers (0 = config / rayon default)
    #[arg(long, default_value = "0")]
    workers: usize,

    /// Order of the stats document
    #[arg(long, value_enum, default_value = "input")]
    sort: SortOrder,

    /// Count only non-overlapping title mentions
    #[arg(long)]
    non_overlapping: bool,

    /// Apply longer symbols before their substrings
    #[arg(long)]
    longest_first: bool,

    /// Write the run summary as JSON to this file
    #[arg(long)]
    stats_file: Option<PathBuf>,

    /// Hide progress bars and log progress lines instead
    #[arg(long)]
    log_only: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn analyze_songs(analyzer: &LyricsAnalyzer, songs: &[Song]) -> Vec<SongStats> {
    let total = songs.len() as u64;
    let pb = create_progress_bar(total, "Analyzing lyrics");
    let done = AtomicU64::new(0);

    let stats: Vec<SongStats> = songs
        .par_iter()
        .map(|song| {
            let result = analyzer.analyze(song);
            let current = done.fetch_add(1, Ordering::Relaxed) + 1;
            log_progress("analyze", current, total, PROGRESS_LOG_INTERVAL);
            pb.inc(1);
            result
        })
        .collect();

    pb.finish_with_message(format!("Analyzed {} songs", stats.len()));
    stats
}

fn write_stats(path: &Path, stats: &[SongStats]) -> Result<()> {
    let spinner = create_spinner("Writing stats document");
    let json = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    spinner.finish_with_message(format!("Wrote {} records to {}", stats.len(), path.display()));
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
    set_log_only(args.log_only);

    let mut config = AnalyzerConfig::load(args.config.as_deref())?;
    if args.non_overlapping {
        config.match_mode = MatchMode::NonOverlapping;
    }
    if args.longest_first {
        config.substitution_order = SubstitutionOrder::LongestFirst;
    }
    let limit = args.limit.unwrap_or(config.report_limit);

    let workers = if args.workers > 0 { args.workers } else { config.workers };
    if workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    if let Some(ref output) = args.output {
        validate_output_path(output, "stats", &[args.source.as_path()])?;
    }

    let analyzer = config.build_analyzer()?;
    let start = Instant::now();

    log::info!("Reading lyrics document: {}", args.source.display());
    let loaded = load_songs(&args.source)?;
    if !loaded.skipped.is_empty() {
        log::warn!("Skipped {} malformed records", loaded.skipped.len());
    }

    let stats = analyze_songs(&analyzer, &loaded.songs);

    println!();
    print!("{}", mentions_table(&stats, limit));
    println!();
    print!("{}", percentage_table(&stats, limit));

    if let Some(ref output) = args.output {
        let ordered = match args.sort {
            SortOrder::Input => stats.clone(),
            SortOrder::Mentions => sort_by_title_mentions(&stats),
            SortOrder::Percentage => sort_by_title_percentage(&stats),
        };
        write_stats(output, &ordered)?;
    }

    let summary =
        AnalysisSummary::from_stats(loaded.total(), loaded.skipped.len(), &stats, start.elapsed());
    summary.log_phase("final");
    if let Some(ref path) = args.stats_file {
        summary.write_to_file(path)?;
    }

    println!("\n{:=<60}", "");
    println!("Analysis complete!");
    println!("  Songs: {} ({} skipped)", summary.songs_analyzed, summary.songs_skipped);
    println!(
        "  Mentioning their title: {} ({:.1}%)",
        summary.songs_with_mentions,
        summary.mention_rate()
    );
    println!("  Total words: {}", summary.total_words);
    println!("  Elapsed: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    Ok(())
}
