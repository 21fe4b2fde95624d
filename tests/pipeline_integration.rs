//! End-to-end pipeline tests through the public library API, using stub
//! detectors so outcomes are deterministic.

use std::path::PathBuf;

use langbench::{
    run, LangDetector, LanguageSet, ReaderConfig, Result, RunConfig, RunOutcome,
};
use tempfile::TempDir;

/// Cycles through a fixed answer sequence, ignoring the text
struct ScriptedDetector {
    name: &'static str,
    answers: Vec<&'static str>,
    cursor: std::cell::Cell<usize>,
}

impl ScriptedDetector {
    fn new(name: &'static str, answers: Vec<&'static str>) -> Self {
        Self {
            name,
            answers,
            cursor: std::cell::Cell::new(0),
        }
    }
}

impl LangDetector for ScriptedDetector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn detect(&self, _text: &str) -> Result<String> {
        let i = self.cursor.get();
        self.cursor.set(i + 1);
        Ok(self.answers[i % self.answers.len()].to_string())
    }
}

async fn run_corpus(
    temp: &TempDir,
    corpus: &str,
    detectors: Vec<Box<dyn LangDetector>>,
    languages: &LanguageSet,
) -> (RunOutcome, PathBuf) {
    let input = temp.path().join("corpus.tsv");
    std::fs::write(&input, corpus).unwrap();
    let output = temp.path().join("detail.tsv");

    let config = RunConfig {
        input,
        output: output.clone(),
        show_progress: false,
        reader: ReaderConfig::default(),
    };
    let outcome = run(languages, &detectors, &config).await.unwrap();
    (outcome, output)
}

#[tokio::test]
async fn full_pass_builds_consistent_matrices_and_detail_file() {
    let temp = TempDir::new().unwrap();
    let languages = LanguageSet::from_csv("en,fr,de").unwrap();

    // 6 well-formed records plus 2 malformed lines
    let corpus = "en\tthe quick brown fox\n\
fr\tle renard brun rapide\n\
garbage-no-tab\n\
de\tder schnelle braune fuchs\n\
en\tanother english sample\n\
\n\
fr\tencore un exemple\n\
de\tnoch ein beispiel\n";

    // first detector always right, second always answers en, third scripted
    let detectors: Vec<Box<dyn LangDetector>> = vec![
        Box::new(ScriptedDetector::new(
            "oracle",
            vec!["en", "fr", "de", "en", "fr", "de"],
        )),
        Box::new(ScriptedDetector::new("anglophile", vec!["en"])),
        Box::new(ScriptedDetector::new(
            "coinflip",
            vec!["fr", "fr", "de", "de", "en", "en"],
        )),
    ];

    let (outcome, output) = run_corpus(&temp, corpus, detectors, &languages).await;

    assert_eq!(outcome.stats.records(), 6);
    assert_eq!(outcome.summary.skipped_lines, 2);
    for detector in 0..3 {
        assert_eq!(outcome.stats.matrix(detector).total(), 6);
    }

    // oracle is diagonal-only
    let oracle = outcome.stats.matrix(0);
    assert!((oracle.accuracy() - 1.0).abs() < 1e-12);
    for i in 0..languages.len() {
        assert_eq!(oracle.cell(i, i), 2);
    }

    // anglophile: every record predicted en, so column en holds all 6
    let anglophile = outcome.stats.matrix(1);
    let en = languages.index_of("en").unwrap();
    assert_eq!(anglophile.col_sum(en), 6);
    assert!((anglophile.accuracy() - 2.0 / 6.0).abs() < 1e-12);

    let detail = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = detail.lines().collect();
    assert_eq!(lines.len(), 6);
    for line in &lines {
        assert_eq!(line.split('\t').count(), 9);
    }

    // detail truth column matches the corpus record order
    let truths: Vec<&str> = lines.iter().map(|l| l.split('\t').next().unwrap()).collect();
    assert_eq!(truths, ["en", "fr", "de", "en", "fr", "de"]);
}

#[tokio::test]
async fn detail_counts_match_independent_recomputation() {
    let temp = TempDir::new().unwrap();
    let languages = LanguageSet::from_csv("en,fr").unwrap();
    let text = "du texte avec cinq mots";
    let corpus = format!("fr\t{text}\n");

    let detectors: Vec<Box<dyn LangDetector>> = vec![
        Box::new(ScriptedDetector::new("d1", vec!["fr"])),
        Box::new(ScriptedDetector::new("d2", vec!["fr"])),
        Box::new(ScriptedDetector::new("d3", vec!["en"])),
    ];

    let (_outcome, output) = run_corpus(&temp, &corpus, detectors, &languages).await;

    let detail = std::fs::read_to_string(&output).unwrap();
    let fields: Vec<&str> = detail.trim_end().split('\t').collect();
    assert_eq!(fields[0], "fr");
    assert_eq!(fields[7], text.split(' ').count().to_string());
    assert_eq!(fields[8], text.chars().count().to_string());

    // latency columns parse as integers
    for idx in [2, 4, 6] {
        fields[idx].parse::<u64>().unwrap();
    }
}

#[tokio::test]
async fn unknown_truth_label_aborts_with_exit_code_4() {
    let temp = TempDir::new().unwrap();
    let languages = LanguageSet::from_csv("en,fr").unwrap();
    let corpus = "en\tfine text\nzz\tmystery language\nen\tnever reached\n";

    let detectors: Vec<Box<dyn LangDetector>> = vec![
        Box::new(ScriptedDetector::new("d1", vec!["en"])),
        Box::new(ScriptedDetector::new("d2", vec!["en"])),
        Box::new(ScriptedDetector::new("d3", vec!["en"])),
    ];

    let input = temp.path().join("corpus.tsv");
    std::fs::write(&input, corpus).unwrap();
    let config = RunConfig {
        input,
        output: temp.path().join("detail.tsv"),
        show_progress: false,
        reader: ReaderConfig::default(),
    };

    let err = run(&languages, &detectors, &config).await.unwrap_err();
    assert!(matches!(err, langbench::Error::UnknownLabel { ref code } if code == "zz"));
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn detector_failure_is_fatal_mid_run() {
    struct FlakyDetector;

    impl LangDetector for FlakyDetector {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn detect(&self, text: &str) -> Result<String> {
            if text.contains("boom") {
                Err(langbench::Error::Detector {
                    name: "flaky",
                    reason: "synthetic failure".into(),
                })
            } else {
                Ok("en".to_string())
            }
        }
    }

    let temp = TempDir::new().unwrap();
    let languages = LanguageSet::from_csv("en,fr").unwrap();
    let corpus = "en\tcalm text\nen\tboom goes the engine\n";

    let detectors: Vec<Box<dyn LangDetector>> = vec![
        Box::new(FlakyDetector),
        Box::new(ScriptedDetector::new("d2", vec!["en"])),
        Box::new(ScriptedDetector::new("d3", vec!["en"])),
    ];

    let input = temp.path().join("corpus.tsv");
    std::fs::write(&input, corpus).unwrap();
    let config = RunConfig {
        input,
        output: temp.path().join("detail.tsv"),
        show_progress: false,
        reader: ReaderConfig::default(),
    };

    let err = run(&languages, &detectors, &config).await.unwrap_err();
    assert!(matches!(err, langbench::Error::Detector { name: "flaky", .. }));
    assert_eq!(err.exit_code(), 5);
}
