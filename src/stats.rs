// WHY: mean sentence length gives a quick sense of over/under segmentation
// before looking at cut-level scores

use serde::Serialize;

/// Number of words in a line once ASCII punctuation is removed
///
/// Uses the full ASCII punctuation set, broader than the reference normalizer,
/// so tokens made only of punctuation never count as words.
pub fn count_words(line: &str) -> usize {
    line.split_whitespace()
        .filter(|token| token.chars().any(|ch| !ch.is_ascii_punctuation()))
        .count()
}

/// Running line and word totals for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentenceStats {
    pub lines: usize,
    pub words: usize,
}

impl SentenceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_line(&mut self, line: &str) {
        self.lines += 1;
        self.words += count_words(line);
    }

    /// Average words per line; `None` for a file without lines
    pub fn mean_words(&self) -> Option<f64> {
        if self.lines == 0 {
            return None;
        }
        Some(self.words as f64 / self.lines as f64)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SentenceStats {
    fn from_iter<I: IntoIterator<Item = S>>(lines: I) -> Self {
        let mut stats = Self::new();
        for line in lines {
            stats.record_line(line.as_ref());
        }
        stats
    }
}
