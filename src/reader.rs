use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::aligner::{Alignment, CutAligner};
use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::metrics::{CutMetrics, RunTotals};
use crate::stats::SentenceStats;

/// Async line reader over one input file
///
/// Bytes that are not valid UTF-8 (Latin-1 transcripts, stray bytes) are
/// replaced with U+FFFD instead of failing the run.
pub struct LineStream {
    path: PathBuf,
    reader: BufReader<File>,
    buffer: Vec<u8>,
    lines_read: u64,
    lossy_lines: u64,
}

impl LineStream {
    pub async fn open<P: AsRef<Path>>(path: P, buffer_size: usize) -> EvalResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await.map_err(|source| EvalError::Open {
            path: path.clone(),
            source,
        })?;

        // WHY: BufReader with custom buffer size reduces syscalls on large transcripts
        let reader = BufReader::with_capacity(buffer_size, file);
        Ok(Self {
            path,
            reader,
            buffer: Vec::new(),
            lines_read: 0,
            lossy_lines: 0,
        })
    }

    /// Next line without its terminator, `None` at end of file
    pub async fn next_line(&mut self) -> EvalResult<Option<String>> {
        self.buffer.clear();
        let bytes_read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .await
            .map_err(|source| EvalError::Read {
                path: self.path.clone(),
                line: self.lines_read + 1,
                source,
            })?;

        if bytes_read == 0 {
            return Ok(None);
        }
        self.lines_read += 1;

        let mut content: &[u8] = &self.buffer;
        if let Some(stripped) = content.strip_suffix(b"\n") {
            content = stripped;
            if let Some(stripped) = content.strip_suffix(b"\r") {
                content = stripped;
            }
        }

        let line = match String::from_utf8_lossy(content) {
            Cow::Borrowed(line) => line.to_string(),
            Cow::Owned(line) => {
                if self.lossy_lines == 0 {
                    warn!(
                        "{} is not valid UTF-8 at line {}; invalid bytes replaced",
                        self.path.display(),
                        self.lines_read
                    );
                }
                self.lossy_lines += 1;
                line
            }
        };
        Ok(Some(line))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Lines that needed invalid bytes replaced
    pub fn lossy_lines(&self) -> u64 {
        self.lossy_lines
    }
}

/// Line count and sentence statistics for one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub stats: SentenceStats,
}

impl FileSummary {
    pub fn lines(&self) -> usize {
        self.stats.lines
    }
}

/// Everything one evaluation run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub evaluated: FileSummary,
    pub reference: FileSummary,
    pub totals: RunTotals,
    pub metrics: CutMetrics,
    pub alignment: Alignment,
}

/// Read a whole file once to count its lines and words
pub async fn scan_file<P: AsRef<Path>>(path: P, buffer_size: usize) -> EvalResult<FileSummary> {
    let mut stream = LineStream::open(&path, buffer_size).await?;
    let mut stats = SentenceStats::new();

    while let Some(line) = stream.next_line().await? {
        stats.record_line(&line);
    }

    debug!(
        "Scanned {}: {} lines, {} words",
        stream.path().display(),
        stats.lines,
        stats.words
    );

    Ok(FileSummary {
        path: stream.path().display().to_string(),
        stats,
    })
}

/// Scan a file and reject it when it has no lines
pub async fn scan_non_empty<P: AsRef<Path>>(path: P, buffer_size: usize) -> EvalResult<FileSummary> {
    let summary = scan_file(&path, buffer_size).await?;
    if summary.lines() == 0 {
        return Err(EvalError::EmptyInput {
            path: path.as_ref().to_path_buf(),
        });
    }
    Ok(summary)
}

/// Stream both files in lockstep through a [`CutAligner`]
///
/// Both files stay open for the whole pass and are closed when this returns,
/// on success or error.
pub async fn align_files<P, Q>(
    evaluated_path: P,
    reference_path: Q,
    config: &EvalConfig,
) -> EvalResult<Alignment>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut evaluated = LineStream::open(evaluated_path, config.buffer_size).await?;
    let mut reference = LineStream::open(reference_path, config.buffer_size).await?;
    let mut aligner = CutAligner::new(config.window_size);

    for _ in 0..config.window_size.get() {
        match reference.next_line().await? {
            Some(line) => aligner.push_reference(&line),
            None => break,
        }
    }

    while let Some(line) = evaluated.next_line().await? {
        aligner.step(&line);
        let next = reference.next_line().await?;
        aligner.refill(next.as_deref());
    }

    debug!(
        evaluated_lines = evaluated.lines_read(),
        reference_lines = reference.lines_read(),
        "Alignment pass complete"
    );

    Ok(aligner.finish())
}

/// Validate both inputs, align them and score the result
///
/// The evaluated file is checked first, so when both are empty the error names it.
pub async fn evaluate_files<P, Q>(
    evaluated_path: P,
    reference_path: Q,
    config: &EvalConfig,
) -> EvalResult<Evaluation>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let start_time = std::time::Instant::now();

    let evaluated = scan_non_empty(&evaluated_path, config.buffer_size).await?;
    let reference = scan_non_empty(&reference_path, config.buffer_size).await?;

    let alignment = align_files(&evaluated_path, &reference_path, config).await?;

    let totals = RunTotals {
        evaluated_lines: evaluated.lines(),
        reference_lines: reference.lines(),
        matched_cuts: alignment.matched_count,
    };
    let metrics = CutMetrics::from_totals(&totals);

    info!(
        "Evaluated {} against {}: {} of {} cuts matched in {}ms",
        evaluated.path,
        reference.path,
        totals.matched_cuts,
        totals.evaluated_lines,
        start_time.elapsed().as_millis()
    );

    Ok(Evaluation {
        evaluated,
        reference,
        totals,
        metrics,
        alignment,
    })
}
