// WHY: greedy nearest-match alignment of sentence cuts. Each evaluated line is
// tested against a bounded lookahead window of upcoming reference lines; the
// closest reference line ending on the same word wins.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::debug;

use crate::normalizer::{clean_evaluated_line, cut_endings_match, normalize_reference_line_into};

/// Number of upcoming reference lines an evaluated line is tested against
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => panic!("window size must be non-zero"),
};

/// Normalized reference line tagged with its 0-based position in the reference file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub line_index: usize,
    pub text: String,
}

/// Successful alignment of an evaluated cut with a reference cut
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutMatch {
    pub evaluated_index: usize,
    pub reference_index: usize,
    /// Position inside the lookahead window when the match happened
    pub window_position: usize,
    pub evaluated: String,
    pub reference: String,
}

/// Line from either file that found no counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedLine {
    pub index: usize,
    pub text: String,
}

/// Result of a single [`CutAligner::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Matched {
        window_position: usize,
        reference_index: usize,
    },
    Unmatched,
}

/// Complete outcome of an alignment run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alignment {
    pub matched_count: usize,
    pub evaluated_lines: usize,
    pub matches: Vec<CutMatch>,
    pub unmatched_evaluated: Vec<UnmatchedLine>,
    /// Reference lines skipped over by a later match
    pub unmatched_reference: Vec<UnmatchedLine>,
    /// Reference lines still waiting in the window when the evaluated input ended.
    /// They are not counted as unmatched.
    pub pending_reference: usize,
}

/// FIFO of upcoming normalized reference lines
///
/// `capacity` bounds the initial seed only. Every evaluated line appends one
/// more reference line, so a run of misses grows the window past it and older
/// entries stay matchable until a later match consumes them.
#[derive(Debug, Clone)]
pub struct LookaheadWindow {
    entries: VecDeque<ReferenceEntry>,
    capacity: NonZeroUsize,
}

impl LookaheadWindow {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Number of reference lines the window is seeded with
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }

    /// Append an entry behind the current ones; nothing is ever dropped
    pub fn push(&mut self, entry: ReferenceEntry) {
        self.entries.push_back(entry);
    }

    /// Position of the first entry ending on the same word as `evaluated`
    pub fn find_match(&self, evaluated: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| cut_endings_match(evaluated, &entry.text))
    }

    /// Remove entries `[0, position]`; returns the skipped entries `[0, position)`
    /// and the matched entry. `None` when `position` is out of range.
    pub fn consume_through(
        &mut self,
        position: usize,
    ) -> Option<(Vec<ReferenceEntry>, ReferenceEntry)> {
        if position >= self.entries.len() {
            return None;
        }
        let skipped: Vec<ReferenceEntry> = self.entries.drain(..position).collect();
        let matched = self.entries.pop_front()?;
        Some((skipped, matched))
    }
}

/// Stateful cursor over the evaluated and reference line sequences
///
/// Reference lines arrive one at a time through [`CutAligner::push_reference`].
/// Entries only leave the window when a match consumes them.
#[derive(Debug)]
pub struct CutAligner {
    window: LookaheadWindow,
    next_reference_index: usize,
    alignment: Alignment,
    scratch: String,
}

impl CutAligner {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            window: LookaheadWindow::new(capacity),
            next_reference_index: 0,
            alignment: Alignment::default(),
            scratch: String::new(),
        }
    }

    pub fn window(&self) -> &LookaheadWindow {
        &self.window
    }

    /// Number of reference lines pushed so far
    pub fn reference_lines_seen(&self) -> usize {
        self.next_reference_index
    }

    /// Seed the window with up to `capacity` reference lines from `lines`
    pub fn seed<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines.into_iter().take(self.window.capacity()) {
            self.push_reference(line.as_ref());
        }
    }

    /// Normalize a raw reference line and append it to the window
    pub fn push_reference(&mut self, raw: &str) {
        normalize_reference_line_into(raw, &mut self.scratch);
        let entry = ReferenceEntry {
            line_index: self.next_reference_index,
            text: self.scratch.clone(),
        };
        self.next_reference_index += 1;

        self.window.push(entry);
    }

    /// Advance the reference stream by one line, if the stream has one left
    pub fn refill(&mut self, raw: Option<&str>) {
        if let Some(raw) = raw {
            self.push_reference(raw);
        }
    }

    /// Test one evaluated line against the window
    pub fn step(&mut self, evaluated: &str) -> StepOutcome {
        let evaluated_index = self.alignment.evaluated_lines;
        self.alignment.evaluated_lines += 1;

        let cleaned = clean_evaluated_line(evaluated);
        let outcome = match self.window.find_match(&cleaned) {
            Some(position) => self.record_match(evaluated_index, evaluated, position),
            None => None,
        };

        match outcome {
            Some(outcome) => outcome,
            None => {
                debug!(evaluated_index, "no matching cut in lookahead window");
                self.alignment.unmatched_evaluated.push(UnmatchedLine {
                    index: evaluated_index,
                    text: evaluated.trim_end().to_string(),
                });
                StepOutcome::Unmatched
            }
        }
    }

    fn record_match(
        &mut self,
        evaluated_index: usize,
        evaluated: &str,
        position: usize,
    ) -> Option<StepOutcome> {
        let (skipped, matched) = self.window.consume_through(position)?;
        let reference_index = matched.line_index;

        debug!(
            evaluated_index,
            reference_index,
            window_position = position,
            skipped = skipped.len(),
            "matched cut"
        );

        self.alignment
            .unmatched_reference
            .extend(skipped.into_iter().map(|entry| UnmatchedLine {
                index: entry.line_index,
                text: entry.text,
            }));
        self.alignment.matched_count += 1;
        self.alignment.matches.push(CutMatch {
            evaluated_index,
            reference_index,
            window_position: position,
            evaluated: evaluated.trim_end().to_string(),
            reference: matched.text,
        });

        Some(StepOutcome::Matched {
            window_position: position,
            reference_index,
        })
    }

    /// Close the run; lines left in the window are only counted as pending
    pub fn finish(mut self) -> Alignment {
        self.alignment.pending_reference = self.window.len();
        self.alignment
    }
}

/// Align two line sequences with the default window size
pub fn align<E, R>(evaluated: E, reference: R) -> Alignment
where
    E: IntoIterator,
    E::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    align_with_capacity(evaluated, reference, DEFAULT_WINDOW_SIZE)
}

/// Align two line sequences, advancing the reference side one line per evaluated line
pub fn align_with_capacity<E, R>(evaluated: E, reference: R, capacity: NonZeroUsize) -> Alignment
where
    E: IntoIterator,
    E::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let mut aligner = CutAligner::new(capacity);
    let mut reference = reference.into_iter();

    aligner.seed(reference.by_ref());

    for line in evaluated {
        aligner.step(line.as_ref());
        match reference.next() {
            Some(next) => aligner.refill(Some(next.as_ref())),
            None => aligner.refill(None),
        }
    }

    aligner.finish()
}
