pub mod aligner;
pub mod config;
pub mod error;
pub mod metrics;
pub mod normalizer;
pub mod reader;
pub mod report;
pub mod stats;

// Re-export main types for convenient access
pub use aligner::{align, align_with_capacity, Alignment, CutAligner, CutMatch, UnmatchedLine};
pub use config::{EvalConfig, ReportConfig};
pub use error::{EvalError, EvalResult};
pub use metrics::{f1, precision, recall, CutMetrics, RunTotals};
pub use normalizer::{clean_reference_text, normalize_reference_line};

// Re-export file-level entry points
pub use reader::{evaluate_files, Evaluation, FileSummary};
