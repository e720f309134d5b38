// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test fixture holding an evaluated/reference file pair in a temporary directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Write a file with given content, creating parent directories
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write the evaluated file, one line per entry
    pub fn evaluated(&self, lines: &[&str]) -> PathBuf {
        self.create_file("auto.txt", &join_lines(lines))
    }

    /// Write the reference file, one line per entry
    pub fn reference(&self, lines: &[&str]) -> PathBuf {
        self.create_file("manual.txt", &join_lines(lines))
    }
}

fn join_lines(lines: &[&str]) -> String {
    let mut content = lines.join("\n");
    if !lines.is_empty() {
        content.push('\n');
    }
    content
}

/// Run the `evaluate` binary with given arguments
pub fn run_evaluate<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_evaluate"))
        .args(args)
        .output()
        .expect("Failed to run evaluate")
}

/// Sample automatic transcript: one detached period, one missed cut, one extra cut
pub const AUTO_LINES: &[&str] = &[
    "bonjour à tous .",
    "aujourd'hui nous parlons du temps il fait beau",
    "ce matin",
    "il a plu .",
    "merci",
];

/// Reference transcript matching [`AUTO_LINES`]
pub const MANUAL_LINES: &[&str] = &[
    "p1\tBonjour à tous.",
    "p1\tAujourd'hui, nous parlons du temps.",
    "p1\tIl fait beau !",
    "p2\tCe matin, il a plu.",
    "p1\tMerci.",
];
