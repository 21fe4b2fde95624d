//! Uniform detector seam over heterogeneous language-identification engines
//!
//! Each engine has its own model and call convention; adapters hide that behind
//! a single `detect(text) -> code` operation. Wall-clock timing belongs to the
//! harness, never to the adapters, so all engines are measured identically.

use std::time::Instant;

use crate::error::Result;
use crate::languages::LanguageSet;

pub mod lingua;
pub mod whatlang;
pub mod whichlang;

pub use self::lingua::LinguaAdapter;
pub use self::whatlang::WhatlangAdapter;
pub use self::whichlang::WhichlangAdapter;

/// One language-identification engine behind a uniform interface
pub trait LangDetector: Send {
    /// Short engine name used in reports and error messages.
    fn name(&self) -> &'static str;

    /// Identify the language of `text` as an ISO 639-1 code.
    ///
    /// An engine that cannot produce a usable answer returns
    /// `Error::Detector`, which aborts the run.
    fn detect(&self, text: &str) -> Result<String>;
}

/// Result of one timed detection call
#[derive(Debug, Clone)]
pub struct TimedDetection {
    /// Predicted ISO 639-1 code
    pub code: String,
    /// Wall-clock time spent inside `detect`, in nanoseconds
    pub elapsed_nanos: u64,
}

/// Run one detection with wall-clock timing taken immediately around the call.
pub fn detect_timed(detector: &dyn LangDetector, text: &str) -> Result<TimedDetection> {
    let start = Instant::now();
    let code = detector.detect(text)?;
    let elapsed_nanos = start.elapsed().as_nanos() as u64;
    Ok(TimedDetection { code, elapsed_nanos })
}

/// The three benchmark engines in their fixed evaluation order.
pub fn default_detectors(languages: &LanguageSet) -> Vec<Box<dyn LangDetector>> {
    vec![
        Box::new(WhatlangAdapter::new(languages)),
        Box::new(LinguaAdapter::new(languages)),
        Box::new(WhichlangAdapter::new()),
    ]
}
