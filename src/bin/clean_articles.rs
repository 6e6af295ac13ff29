/// Convert a directory of raw HTML article dumps into clean JSON records.
///
/// Usage:
///   clean-articles [--input <dir>] [--output <dir>] [--language <name>]
///
/// Each `<input>/<name>/` must hold `<name>.html` and `<name>.json`; the run
/// writes `<output>/<name>.json` per entry and stops at the first failure.
use std::path::PathBuf;

use anyhow::{Context, Result};
use article_cleaner::batch::{BatchConfig, Converter, DEFAULT_INPUT_ROOT, DEFAULT_OUTPUT_ROOT};
use article_cleaner::{Config, Extractor};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding one subdirectory per raw article
    #[arg(short, long, env = "CLEAN_ARTICLES_INPUT", default_value = DEFAULT_INPUT_ROOT)]
    input: PathBuf,

    /// Directory for clean JSON records (created if missing)
    #[arg(short, long, env = "CLEAN_ARTICLES_OUTPUT", default_value = DEFAULT_OUTPUT_ROOT)]
    output: PathBuf,

    /// Stoplist language; "none" classifies by length and links only
    #[arg(short, long, default_value = "English")]
    language: String,

    /// Do not treat headings specially
    #[arg(long)]
    no_headings: bool,

    /// Log every saved file
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn extractor(args: &Args) -> Result<Extractor> {
    let extractor = if args.language.eq_ignore_ascii_case("none") {
        Extractor::language_independent()
    } else {
        Extractor::for_language(&args.language)?
    };
    let config: Config = extractor.config().clone().with_no_headings(args.no_headings);
    Ok(extractor.with_config(config))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = BatchConfig::default()
        .with_input_root(&args.input)
        .with_output_root(&args.output);
    let converter = Converter::new(config, extractor(&args)?);

    let report = converter
        .run()
        .with_context(|| format!("converting articles under {}", args.input.display()))?;

    println!(
        "Converted {} article(s) into {}",
        report.len(),
        args.output.display()
    );
    Ok(())
}
