// WHY: typed failures let the CLI map empty inputs to a dedicated exit path
// while the library stays free of process-level concerns

use std::path::PathBuf;

use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("{} is empty", path.display())]
    EmptyInput { path: PathBuf },

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {} at line {line}: {source}", path.display())]
    Read {
        path: PathBuf,
        line: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("lookahead window must hold at least one line (got {0})")]
    InvalidWindow(usize),
}

impl EvalError {
    #[must_use]
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message_names_file() {
        let err = EvalError::EmptyInput {
            path: PathBuf::from("auto.txt"),
        };
        assert_eq!(err.to_string(), "auto.txt is empty");
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_read_error_carries_line() {
        let err = EvalError::Read {
            path: PathBuf::from("ref.txt"),
            line: 4,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        };
        let msg = err.to_string();
        assert!(msg.contains("ref.txt"));
        assert!(msg.contains("line 4"));
        assert!(!err.is_empty_input());
    }

    #[test]
    fn test_invalid_window_message() {
        let err = EvalError::InvalidWindow(0);
        assert!(!err.is_empty_input());
        assert!(err.to_string().contains("got 0"));
    }
}
