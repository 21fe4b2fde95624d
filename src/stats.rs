//! Per-language accumulators and classification metrics
//!
//! One `RunStats` owns every counter for a single pass over the corpus: one
//! N×N confusion matrix per detector plus per-language sample/word/char totals
//! and per-detector latency sums. Updates are additive only, one set per
//! record; nothing is shared across runs.
//!
//! Latency and size sums use `u128` so a large corpus with nanosecond timings
//! cannot overflow a 64-bit counter.

use crate::languages::LanguageSet;

/// N×N confusion grid, rows = truth, columns = predicted
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    cells: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![vec![0; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Count one record with true language `truth` classified as `predicted`.
    pub fn record(&mut self, truth: usize, predicted: usize) {
        self.cells[truth][predicted] += 1;
    }

    pub fn cell(&self, truth: usize, predicted: usize) -> u64 {
        self.cells[truth][predicted]
    }

    pub fn row(&self, truth: usize) -> &[u64] {
        &self.cells[truth]
    }

    /// Sum over all cells; equals the number of records accumulated.
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    fn trace(&self) -> u64 {
        (0..self.size()).map(|i| self.cells[i][i]).sum()
    }

    pub fn row_sum(&self, truth: usize) -> u64 {
        self.cells[truth].iter().sum()
    }

    pub fn col_sum(&self, predicted: usize) -> u64 {
        self.cells.iter().map(|row| row[predicted]).sum()
    }

    /// Fraction of records on the diagonal.
    pub fn accuracy(&self) -> f64 {
        self.trace() as f64 / self.total() as f64
    }

    /// Per-language precision, recall and F-score.
    ///
    /// Deliberately reproduces the original benchmark's formulas: precision
    /// divides the diagonal by the truth-row sum and recall by the
    /// predicted-column sum, the reverse of the textbook convention. Zero
    /// denominators are not guarded and produce NaN, as the original did.
    pub fn language_metrics(&self, idx: usize) -> LanguageMetrics {
        let hit = self.cells[idx][idx] as f64;
        let precision = hit / self.row_sum(idx) as f64;
        let recall = hit / self.col_sum(idx) as f64;
        LanguageMetrics {
            precision,
            recall,
            fscore: 2.0 * precision * recall / (precision + recall),
        }
    }
}

/// Precision/recall/F-score triple for one language
#[derive(Debug, Clone, Copy)]
pub struct LanguageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub fscore: f64,
}

/// Running totals for one truth language
#[derive(Debug, Clone)]
pub struct LanguageTotals {
    pub samples: u64,
    pub total_words: u128,
    pub total_chars: u128,
    /// Nanoseconds spent in each detector on this language's records
    pub total_latency_ns: Vec<u128>,
}

impl LanguageTotals {
    fn new(detectors: usize) -> Self {
        Self {
            samples: 0,
            total_words: 0,
            total_chars: 0,
            total_latency_ns: vec![0; detectors],
        }
    }

    /// Truncating integer average, 0 when no samples were seen.
    fn avg(total: u128, samples: u64) -> u128 {
        if samples == 0 {
            0
        } else {
            total / samples as u128
        }
    }

    pub fn avg_words(&self) -> u128 {
        Self::avg(self.total_words, self.samples)
    }

    pub fn avg_chars(&self) -> u128 {
        Self::avg(self.total_chars, self.samples)
    }

    pub fn avg_latency_ns(&self, detector: usize) -> u128 {
        Self::avg(self.total_latency_ns[detector], self.samples)
    }
}

/// All accumulated state for one benchmark pass
#[derive(Debug, Clone)]
pub struct RunStats {
    languages: LanguageSet,
    detector_names: Vec<String>,
    totals: Vec<LanguageTotals>,
    matrices: Vec<ConfusionMatrix>,
    records: u64,
}

impl RunStats {
    pub fn new<S: AsRef<str>>(languages: &LanguageSet, detector_names: &[S]) -> Self {
        let n = languages.len();
        Self {
            languages: languages.clone(),
            detector_names: detector_names.iter().map(|s| s.as_ref().to_string()).collect(),
            totals: (0..n).map(|_| LanguageTotals::new(detector_names.len())).collect(),
            matrices: vec![ConfusionMatrix::new(n); detector_names.len()],
            records: 0,
        }
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn detector_names(&self) -> &[String] {
        &self.detector_names
    }

    pub fn detector_count(&self) -> usize {
        self.detector_names.len()
    }

    /// Records accumulated via `record_sample`.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Count one corpus record for its truth language.
    pub fn record_sample(&mut self, truth: usize, words: u64, chars: u64) {
        let totals = &mut self.totals[truth];
        totals.samples += 1;
        totals.total_words += words as u128;
        totals.total_chars += chars as u128;
        self.records += 1;
    }

    /// Count one detection outcome and its latency.
    pub fn record_detection(&mut self, detector: usize, truth: usize, predicted: usize, nanos: u64) {
        self.totals[truth].total_latency_ns[detector] += nanos as u128;
        self.matrices[detector].record(truth, predicted);
    }

    pub fn matrix(&self, detector: usize) -> &ConfusionMatrix {
        &self.matrices[detector]
    }

    pub fn totals(&self, truth: usize) -> &LanguageTotals {
        &self.totals[truth]
    }
}
