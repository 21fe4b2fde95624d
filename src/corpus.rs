//! Streaming corpus reader
//!
//! Reads tab-separated `<truth_code>\t<text>` lines with async buffered I/O.
//! Single forward pass per reader; a fresh pass needs a fresh `open`.

use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::languages::LanguageSet;

/// Configuration for corpus reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// One labeled corpus sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Ground-truth language code, validated against the run's language set
    pub truth: String,
    /// Raw sample text
    pub text: String,
}

/// Forward-only reader over a labeled TSV corpus
pub struct CorpusReader {
    lines: Lines<BufReader<File>>,
    languages: LanguageSet,
    path: String,
    line_no: u64,
    skipped: u64,
}

impl CorpusReader {
    /// Open a corpus file for a single sequential pass.
    pub async fn open<P: AsRef<Path>>(
        path: P,
        languages: LanguageSet,
        config: ReaderConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|source| Error::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Opened corpus {}", path.display());
        let reader = BufReader::with_capacity(config.buffer_size, file);
        Ok(Self {
            lines: reader.lines(),
            languages,
            path: path.display().to_string(),
            line_no: 0,
            skipped: 0,
        })
    }

    /// Next well-formed record, or `None` at end of corpus.
    ///
    /// Lines that do not split into exactly two tab-separated fields are
    /// skipped without surfacing an error. A truth label outside the
    /// configured language set aborts the pass with `UnknownLabel`.
    pub async fn next_record(&mut self) -> Result<Option<Record>> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;
            let mut fields = line.splitn(3, '\t');
            let record = match (fields.next(), fields.next(), fields.next()) {
                (Some(truth), Some(text), None) => Record {
                    truth: truth.to_string(),
                    text: text.to_string(),
                },
                _ => {
                    self.skipped += 1;
                    debug!("Skipping malformed line {} in {}", self.line_no, self.path);
                    continue;
                }
            };

            if !self.languages.contains(&record.truth) {
                return Err(Error::UnknownLabel { code: record.truth });
            }
            return Ok(Some(record));
        }

        info!(
            "Corpus {} exhausted: {} lines read, {} skipped",
            self.path,
            self.line_no,
            self.skipped
        );
        Ok(None)
    }

    /// Lines dropped so far for not splitting into exactly two fields.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped
    }
}
