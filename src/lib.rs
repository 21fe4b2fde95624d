pub mod corpus;
pub mod detectors;
pub mod error;
pub mod languages;
pub mod report;
pub mod runner;
pub mod stats;

// Re-export main types for convenient access
pub use corpus::{CorpusReader, ReaderConfig, Record};
pub use detectors::{default_detectors, detect_timed, LangDetector, TimedDetection};
pub use error::{Error, Result};
pub use languages::LanguageSet;
pub use report::{print_report, DetailWriter, RunSummary};
pub use runner::{run, RunConfig, RunOutcome};
pub use stats::{ConfusionMatrix, LanguageMetrics, RunStats};
