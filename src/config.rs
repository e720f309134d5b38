// WHY: explicit configuration structs instead of process-wide flags keep the
// alignment pure and let the report layer be driven from tests

use std::num::NonZeroUsize;

use crate::aligner::DEFAULT_WINDOW_SIZE;
use crate::error::{EvalError, EvalResult};

/// Words kept on each side of a truncated sentence when `--words` is absent
pub const DEFAULT_WORDS_TO_PRINT: usize = 10;

/// Configuration for the evaluation run itself
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Lookahead window capacity
    pub window_size: NonZeroUsize,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            buffer_size: 8192,
        }
    }
}

impl EvalConfig {
    /// Build a config with a caller-supplied window size, rejecting zero
    pub fn with_window_size(window_size: usize) -> EvalResult<Self> {
        let window_size =
            NonZeroUsize::new(window_size).ok_or(EvalError::InvalidWindow(window_size))?;
        Ok(Self {
            window_size,
            ..Self::default()
        })
    }
}

/// What the report layer prints and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub color: bool,
    pub show_matches: bool,
    pub show_unmatched: bool,
    pub verbose: bool,
    /// Words kept at each end of a printed sentence, 0 prints it whole
    pub words: usize,
    /// Whether `--words` was given explicitly
    pub words_explicit: bool,
    pub json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            color: false,
            show_matches: false,
            show_unmatched: false,
            verbose: false,
            words: DEFAULT_WORDS_TO_PRINT,
            words_explicit: false,
            json: false,
        }
    }
}

impl ReportConfig {
    /// Resolve CLI flags; `--verbose` implies both listings
    pub fn from_flags(
        color: bool,
        matching_cuts: bool,
        unmatched: bool,
        verbose: bool,
        words: Option<usize>,
        json: bool,
    ) -> Self {
        Self {
            color,
            show_matches: verbose || matching_cuts,
            show_unmatched: verbose || unmatched,
            verbose,
            words: words.unwrap_or(DEFAULT_WORDS_TO_PRINT),
            words_explicit: words.is_some(),
            json,
        }
    }

    /// False when only the listings were requested, which skips the summary
    pub fn summary_requested(&self) -> bool {
        self.verbose || !(self.show_matches || self.show_unmatched)
    }

    /// Non-fatal warning for `--words` without any listing to apply it to
    pub fn words_warning(&self) -> Option<&'static str> {
        if self.words_explicit && !(self.show_matches || self.show_unmatched) {
            Some("--words needs --matching-cuts, --unmatched or --verbose")
        } else {
            None
        }
    }
}
