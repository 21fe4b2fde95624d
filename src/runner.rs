//! Sequential benchmark pass
//!
//! One record at a time: read, run every detector in fixed order with timing,
//! accumulate, write the detail row, then read the next. No task parallelism;
//! the accumulator has exactly one writer for the whole pass.

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::corpus::{CorpusReader, ReaderConfig};
use crate::detectors::{detect_timed, LangDetector, TimedDetection};
use crate::error::Result;
use crate::languages::LanguageSet;
use crate::report::{DetailWriter, RunSummary};
use crate::stats::RunStats;

/// Configuration for one benchmark pass
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Labeled corpus, `<code>\t<text>` per line
    pub input: PathBuf,
    /// Per-record detail TSV destination
    pub output: PathBuf,
    /// Show a progress spinner on stderr
    pub show_progress: bool,
    pub reader: ReaderConfig,
}

/// Outcome of a completed pass
#[derive(Debug)]
pub struct RunOutcome {
    pub stats: RunStats,
    pub summary: RunSummary,
}

/// Run the full corpus through every detector and accumulate statistics.
///
/// Fails fast: an unopenable file, an unknown truth or predicted label, or a
/// detector failure aborts the pass with no report. Records already written to
/// the detail file stay there up to the last flush.
pub async fn run(
    languages: &LanguageSet,
    detectors: &[Box<dyn LangDetector>],
    config: &RunConfig,
) -> Result<RunOutcome> {
    let run_start = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let pass_timer = Instant::now();

    let mut reader =
        CorpusReader::open(&config.input, languages.clone(), config.reader.clone()).await?;
    let mut writer = DetailWriter::create(&config.output).await?;

    let names: Vec<&str> = detectors.iter().map(|d| d.name()).collect();
    let mut stats = RunStats::new(languages, &names);

    let progress = if config.show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_message("benchmarking");
        Some(bar)
    } else {
        None
    };

    info!(
        "Starting benchmark pass: {} -> {}, {} detectors, {} languages",
        config.input.display(),
        config.output.display(),
        detectors.len(),
        languages.len()
    );

    let mut detections: Vec<TimedDetection> = Vec::with_capacity(detectors.len());
    while let Some(record) = reader.next_record().await? {
        let truth = languages.index_of(&record.truth)?;
        let words = record.text.split(' ').count() as u64;
        let chars = record.text.chars().count() as u64;
        stats.record_sample(truth, words, chars);

        detections.clear();
        for (idx, detector) in detectors.iter().enumerate() {
            let detection = detect_timed(detector.as_ref(), &record.text)?;
            let predicted = languages.index_of(&detection.code)?;
            stats.record_detection(idx, truth, predicted, detection.elapsed_nanos);
            detections.push(detection);
        }

        writer.write_row(&record.truth, &detections, words, chars).await?;
        if let Some(ref bar) = progress {
            bar.inc(1);
        }
        debug!("Processed record {} (truth {})", stats.records(), record.truth);
    }

    writer.flush().await?;
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let duration_ms = pass_timer.elapsed().as_millis() as u64;
    let summary = RunSummary::from_stats(&stats, run_start, duration_ms, reader.skipped_lines());

    info!(
        "Benchmark pass complete: {} records, {} skipped lines, {} ms",
        summary.records, summary.skipped_lines, duration_ms
    );
    Ok(RunOutcome { stats, summary })
}
