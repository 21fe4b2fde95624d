use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use langbench::languages::SAMPLE_LANGUAGES;
use langbench::{default_detectors, print_report, runner, Error, LanguageSet, ReaderConfig};

#[derive(Parser, Debug)]
#[command(name = "langbench")]
#[command(about = "Benchmark language-identification engines against a labeled TSV corpus")]
#[command(version)]
struct Args {
    /// Labeled corpus: one `<truth_code>\t<text>` record per line
    #[arg(default_value = "data/test-100.tsv")]
    input: PathBuf,

    /// Per-record detail output (9-column TSV)
    #[arg(default_value = "data/output.tsv")]
    output: PathBuf,

    /// Comma-separated language codes overriding the built-in 18-code set
    #[arg(long)]
    languages: Option<String>,

    /// Machine-readable JSON run summary path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Suppress the console progress spinner
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run_cli(args).await {
        eprintln!("error: {err:#}");
        let code = err
            .downcast_ref::<Error>()
            .map(Error::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run_cli(args: Args) -> Result<()> {
    info!("Starting langbench");
    info!(?args, "Parsed CLI arguments");

    let languages = match &args.languages {
        Some(csv) => LanguageSet::from_csv(csv)?,
        None => LanguageSet::sample(),
    };
    if languages.len() < 2 {
        anyhow::bail!("need at least two languages to benchmark, got {}", languages.len());
    }
    // The bundled engines only carry models for the sample repertoire
    if let Some(bad) = languages
        .codes()
        .iter()
        .find(|code| !SAMPLE_LANGUAGES.contains(&code.as_str()))
    {
        anyhow::bail!(
            "no detector models for language '{bad}'; supported codes: {}",
            SAMPLE_LANGUAGES.join(",")
        );
    }

    let detectors = default_detectors(&languages);
    let config = runner::RunConfig {
        input: args.input,
        output: args.output,
        show_progress: !args.no_progress,
        reader: ReaderConfig::default(),
    };

    let outcome = runner::run(&languages, &detectors, &config).await?;
    print_report(&outcome.stats);

    if let Some(stats_path) = &args.stats_out {
        let json = serde_json::to_string_pretty(&outcome.summary)?;
        tokio::fs::write(stats_path, json).await?;
        info!("Wrote run summary to {}", stats_path.display());
    }

    info!(
        "Finished: {} records evaluated by {} detectors in {} ms",
        outcome.summary.records,
        outcome.summary.detectors.len(),
        outcome.summary.duration_ms
    );
    Ok(())
}
