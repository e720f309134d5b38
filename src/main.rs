use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

use seams_eval::config::{EvalConfig, ReportConfig};
use seams_eval::reader::evaluate_files;
use seams_eval::report::{self, Palette};

const DESCRIPTION: &str = "Reads an automatically segmented file and a manual reference.
Compares the number of sentences and the average of words per sentence,
then counts sentences whose ending word match.";

#[derive(Parser, Debug)]
#[command(name = "evaluate")]
#[command(about = DESCRIPTION)]
#[command(version)]
struct Args {
    /// File to evaluate, one sentence per line
    evaluated_file: PathBuf,

    /// Reference file, one speaker-tagged sentence per line
    reference_file: PathBuf,

    /// Print colors
    #[arg(short, long)]
    color: bool,

    /// Only print sentences with a matching cut
    #[arg(short, long)]
    matching_cuts: bool,

    /// Print sentences with unmatched cuts (from both files)
    #[arg(short, long)]
    unmatched: bool,

    /// Print statistics, matching and unmatched sentences
    #[arg(short, long)]
    verbose: bool,

    /// Number of words printed at each end of a sentence; 0 prints full sentences
    #[arg(short, long)]
    words: Option<usize>,

    /// Number of upcoming reference lines each sentence is compared with
    #[arg(long, default_value_t = 10)]
    window: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Emit debug logs on stderr
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // WHY: structured logs go to stderr so the report on stdout stays parseable
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_max_level(if args.debug { Level::DEBUG } else { Level::WARN })
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    let report_config = ReportConfig::from_flags(
        args.color,
        args.matching_cuts,
        args.unmatched,
        args.verbose,
        args.words,
        args.json,
    );
    let palette = Palette::new(report_config.color);

    if let Some(warning) = report_config.words_warning() {
        eprintln!("{} {warning}", palette.paint(palette.yellow, "Warning:"));
    }

    let eval_config = EvalConfig::with_window_size(args.window)?;

    let evaluation = match evaluate_files(&args.evaluated_file, &args.reference_file, &eval_config)
        .await
    {
        Ok(evaluation) => evaluation,
        Err(err) if err.is_empty_input() => {
            eprintln!("{} {err}", palette.paint(palette.red, "Error:"));
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!(
                    "Failed to evaluate {} against {}",
                    args.evaluated_file.display(),
                    args.reference_file.display()
                )
            })
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if report_config.show_matches {
        report::write_matches(&mut out, &evaluation.alignment, &report_config)?;
    }
    if report_config.show_unmatched {
        report::write_unmatched(&mut out, &evaluation.alignment, &report_config)?;
    }

    // WHY: listing-only runs stop here without the statistics block
    if !report_config.summary_requested() {
        out.flush()?;
        return Ok(ExitCode::SUCCESS);
    }

    if report_config.json {
        report::write_json_summary(&mut out, &evaluation)?;
    } else {
        if report_config.show_matches || report_config.show_unmatched {
            writeln!(out)?;
        }
        report::write_summary(&mut out, &evaluation, &report_config)?;
    }
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}
