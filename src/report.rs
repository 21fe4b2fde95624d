//! Report output: per-record detail rows, stdout summary tables, JSON stats
//!
//! The detail file gets one 9-column tab-separated row per accepted record;
//! the human-readable report is printed to stdout after the full pass so logs
//! (stderr) never interleave with it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::detectors::TimedDetection;
use crate::error::{Error, Result};
use crate::stats::{ConfusionMatrix, RunStats};

/// Streaming writer for per-record detail rows
pub struct DetailWriter {
    writer: BufWriter<tokio::fs::File>,
    rows: u64,
}

impl DetailWriter {
    /// Create (truncate) the detail output file.
    pub async fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::create(path)
            .await
            .map_err(|source| Error::OutputOpen {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            writer: BufWriter::new(file),
            rows: 0,
        })
    }

    /// Append one detail row:
    /// `truth \t code \t nanos (per detector, in run order) \t words \t chars`.
    pub async fn write_row(
        &mut self,
        truth: &str,
        detections: &[TimedDetection],
        words: u64,
        chars: u64,
    ) -> Result<()> {
        let mut row = String::from(truth);
        for detection in detections {
            row.push('\t');
            row.push_str(&detection.code);
            row.push('\t');
            row.push_str(&detection.elapsed_nanos.to_string());
        }
        row.push_str(&format!("\t{words}\t{chars}\n"));

        self.writer.write_all(row.as_bytes()).await?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush buffered rows to disk. Called once at end of pass.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// Print one detector's confusion matrix, accuracy and per-language table.
pub fn print_detector_report(stats: &RunStats, detector: usize) {
    let languages = stats.languages();
    let matrix = stats.matrix(detector);

    println!("{}", stats.detector_names()[detector]);
    println!("Confusion Matrix:");
    for truth in 0..matrix.size() {
        let row: Vec<String> = matrix.row(truth).iter().map(|c| c.to_string()).collect();
        println!("{}", row.join(" "));
    }

    println!("Accuracy : {}", matrix.accuracy());

    println!("Lang\tPrecision\tRecall\tF-Score");
    for idx in 0..languages.len() {
        let m = matrix.language_metrics(idx);
        println!(
            "{}\t{}\t{}\t{}",
            languages.code(idx),
            m.precision,
            m.recall,
            m.fscore
        );
    }
    println!();
}

/// Print the final per-language averages table across the whole corpus.
pub fn print_averages(stats: &RunStats) {
    let header: Vec<String> = stats
        .detector_names()
        .iter()
        .map(|name| format!("Avg_Time_{name}"))
        .collect();
    println!(
        "Lang\tAvg_Words_Per_Article\tAvg_Chars_Per_Article\t{}",
        header.join("\t")
    );

    for idx in 0..stats.languages().len() {
        let totals = stats.totals(idx);
        let latencies: Vec<String> = (0..stats.detector_count())
            .map(|d| totals.avg_latency_ns(d).to_string())
            .collect();
        println!(
            "{}\t{}\t{}\t{}",
            stats.languages().code(idx),
            totals.avg_words(),
            totals.avg_chars(),
            latencies.join("\t")
        );
    }
    println!("*time in nano seconds");
}

/// Print the full report: one section per detector, then the averages table.
pub fn print_report(stats: &RunStats) {
    for detector in 0..stats.detector_count() {
        print_detector_report(stats, detector);
    }
    print_averages(stats);
}

/// Machine-readable summary of one run, for `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunSummary {
    /// Run start as seconds since the Unix epoch
    pub run_start: u64,
    /// Wall-clock duration of the full pass in milliseconds
    pub duration_ms: u64,
    /// Accepted corpus records
    pub records: u64,
    /// Malformed lines dropped by the reader
    pub skipped_lines: u64,
    pub detectors: Vec<DetectorSummary>,
    pub languages: Vec<LanguageSummary>,
}

/// Whole-corpus view of one detector
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DetectorSummary {
    pub name: String,
    /// `None` for an empty corpus, where accuracy is undefined
    pub accuracy: Option<f64>,
}

/// Whole-corpus view of one truth language
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LanguageSummary {
    pub code: String,
    pub samples: u64,
    pub avg_words: u64,
    pub avg_chars: u64,
    /// Average detect latency per detector, run order, nanoseconds
    pub avg_latency_ns: Vec<u64>,
    /// Precision per detector, run order (the benchmark's row/column
    /// convention); `None` when the ratio is undefined for this corpus
    pub precision: Vec<Option<f64>>,
    pub recall: Vec<Option<f64>>,
    pub fscore: Vec<Option<f64>>,
}

impl RunSummary {
    /// Assemble the summary from accumulated stats.
    pub fn from_stats(stats: &RunStats, run_start: u64, duration_ms: u64, skipped_lines: u64) -> Self {
        let detectors = stats
            .detector_names()
            .iter()
            .enumerate()
            .map(|(d, name)| {
                let accuracy = stats.matrix(d).accuracy();
                DetectorSummary {
                    name: name.clone(),
                    accuracy: accuracy.is_finite().then_some(accuracy),
                }
            })
            .collect();

        let languages = (0..stats.languages().len())
            .map(|idx| {
                let totals = stats.totals(idx);
                // NaN/inf serialize as JSON null; keep them as explicit None
                let per_detector =
                    |f: &dyn Fn(&ConfusionMatrix) -> f64| -> Vec<Option<f64>> {
                        (0..stats.detector_count())
                            .map(|d| {
                                let v = f(stats.matrix(d));
                                v.is_finite().then_some(v)
                            })
                            .collect()
                    };
                LanguageSummary {
                    code: stats.languages().code(idx).to_string(),
                    samples: totals.samples,
                    avg_words: totals.avg_words() as u64,
                    avg_chars: totals.avg_chars() as u64,
                    avg_latency_ns: (0..stats.detector_count())
                        .map(|d| totals.avg_latency_ns(d) as u64)
                        .collect(),
                    precision: per_detector(&|m| m.language_metrics(idx).precision),
                    recall: per_detector(&|m| m.language_metrics(idx).recall),
                    fscore: per_detector(&|m| m.language_metrics(idx).fscore),
                }
            })
            .collect();

        Self {
            run_start,
            duration_ms,
            records: stats.records(),
            skipped_lines,
            detectors,
            languages,
        }
    }
}
