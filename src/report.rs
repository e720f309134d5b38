// WHY: presentation is kept apart from alignment so the same results can be
// printed as text, colored text or JSON, and checked in tests through any writer

use std::borrow::Cow;
use std::io::{self, Write};

use serde::Serialize;

use crate::aligner::{Alignment, UnmatchedLine};
use crate::config::ReportConfig;
use crate::reader::Evaluation;

/// ANSI escape codes, empty when color output is disabled
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub purple: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const PLAIN: Self = Self {
        purple: "",
        green: "",
        yellow: "",
        red: "",
        reset: "",
    };

    pub const ANSI: Self = Self {
        purple: "\x1b[95m",
        green: "\x1b[92m",
        yellow: "\x1b[93m",
        red: "\x1b[91m",
        reset: "\x1b[0m",
    };

    pub fn new(color: bool) -> Self {
        if color {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }

    pub fn paint(&self, color: &str, text: impl std::fmt::Display) -> String {
        format!("{color}{text}{}", self.reset)
    }

    pub fn number(&self, value: impl std::fmt::Display) -> String {
        self.paint(self.green, value)
    }
}

/// Shorten a sentence to its first and last `words` words
///
/// `words == 0` keeps the whole (trimmed) sentence, as does a sentence with at
/// most `2 * words` words.
pub fn truncate_sentence(sentence: &str, words: usize) -> Cow<'_, str> {
    let sentence = sentence.trim();
    if words == 0 {
        return Cow::Borrowed(sentence);
    }

    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    if tokens.len() <= words.saturating_mul(2) {
        return Cow::Borrowed(sentence);
    }

    let head = tokens[..words].join(" ");
    let tail = tokens[tokens.len() - words..].join(" ");
    Cow::Owned(format!("{head} ... {tail}"))
}

/// Print each aligned pair with its line indices
pub fn write_matches<W: Write>(
    out: &mut W,
    alignment: &Alignment,
    config: &ReportConfig,
) -> io::Result<()> {
    let palette = Palette::new(config.color);

    writeln!(out, "{}", palette.paint(palette.purple, "Matching cuts:"))?;
    for cut in &alignment.matches {
        writeln!(out, "{}", palette.paint(palette.green, "Matching sentences:"))?;
        writeln!(
            out,
            "{} {}",
            palette.paint(palette.yellow, format!("{} auto:  ", cut.evaluated_index)),
            truncate_sentence(&cut.evaluated, config.words)
        )?;
        writeln!(
            out,
            "{} {}",
            palette.paint(palette.yellow, format!("{} manual:", cut.reference_index)),
            truncate_sentence(&cut.reference, config.words)
        )?;
    }
    Ok(())
}

/// Print lines of both files that found no counterpart
pub fn write_unmatched<W: Write>(
    out: &mut W,
    alignment: &Alignment,
    config: &ReportConfig,
) -> io::Result<()> {
    let palette = Palette::new(config.color);

    writeln!(
        out,
        "{}",
        palette.paint(palette.red, "Unmatched sentences within evaluated file:")
    )?;
    write_lines(out, &alignment.unmatched_evaluated, config.words)?;
    writeln!(out, "====================")?;
    writeln!(
        out,
        "{}",
        palette.paint(palette.red, "Unmatched sentences within reference file:")
    )?;
    write_lines(out, &alignment.unmatched_reference, config.words)
}

fn write_lines<W: Write>(out: &mut W, lines: &[UnmatchedLine], words: usize) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", truncate_sentence(&line.text, words))?;
    }
    Ok(())
}

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(mean) => format!("{mean:.2}"),
        None => "n/a".to_string(),
    }
}

/// Print the statistics and score block
pub fn write_summary<W: Write>(
    out: &mut W,
    evaluation: &Evaluation,
    config: &ReportConfig,
) -> io::Result<()> {
    let palette = Palette::new(config.color);
    let totals = &evaluation.totals;
    let metrics = &evaluation.metrics;

    writeln!(
        out,
        "Mean words per sentence (evaluated) = {}",
        palette.number(format_mean(evaluation.evaluated.stats.mean_words()))
    )?;
    writeln!(
        out,
        "Mean words per sentence (reference) = {}",
        palette.number(format_mean(evaluation.reference.stats.mean_words()))
    )?;
    writeln!(out)?;
    writeln!(out, "Lines (evaluated)  = {}", palette.number(totals.evaluated_lines))?;
    writeln!(out, "Lines (reference)  = {}", palette.number(totals.reference_lines))?;
    writeln!(out, "Right cuts         = {}", palette.number(totals.matched_cuts))?;
    if config.verbose {
        writeln!(
            out,
            "Pending reference  = {}",
            palette.number(evaluation.alignment.pending_reference)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "precision = {}", palette.number(metrics.precision))?;
    writeln!(out, "recall    = {}", palette.number(metrics.recall))?;
    writeln!(out, "f-1       = {}", palette.number(metrics.f1))?;
    Ok(())
}

/// Flat, machine-readable form of the summary block
#[derive(Debug, Serialize)]
pub struct JsonSummary<'a> {
    pub evaluated_file: &'a str,
    pub reference_file: &'a str,
    pub evaluated_lines: usize,
    pub reference_lines: usize,
    pub mean_words_evaluated: Option<f64>,
    pub mean_words_reference: Option<f64>,
    pub matched_cuts: usize,
    pub unmatched_evaluated: usize,
    pub unmatched_reference: usize,
    pub pending_reference: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl<'a> JsonSummary<'a> {
    pub fn new(evaluation: &'a Evaluation) -> Self {
        Self {
            evaluated_file: &evaluation.evaluated.path,
            reference_file: &evaluation.reference.path,
            evaluated_lines: evaluation.totals.evaluated_lines,
            reference_lines: evaluation.totals.reference_lines,
            mean_words_evaluated: evaluation.evaluated.stats.mean_words(),
            mean_words_reference: evaluation.reference.stats.mean_words(),
            matched_cuts: evaluation.totals.matched_cuts,
            unmatched_evaluated: evaluation.alignment.unmatched_evaluated.len(),
            unmatched_reference: evaluation.alignment.unmatched_reference.len(),
            pending_reference: evaluation.alignment.pending_reference,
            precision: evaluation.metrics.precision,
            recall: evaluation.metrics.recall,
            f1: evaluation.metrics.f1,
        }
    }
}

/// Print the summary as a pretty JSON object
pub fn write_json_summary<W: Write>(out: &mut W, evaluation: &Evaluation) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonSummary::new(evaluation))?;
    writeln!(out)
}
