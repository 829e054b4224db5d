//! Test environment for running the classpatch binary in isolation.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running a classpatch CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// The last non-empty stdout line, i.e. the terminal status line
    pub fn terminal_line(&self) -> &str {
        self.stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
    }
}

/// Isolated test environment with a temp working directory.
pub struct TestEnv {
    /// Temporary root; destination jars and config files live here
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create test root"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_classpatch")),
        }
    }

    /// Directory holding the built classpatch binary
    pub fn bin_dir(&self) -> &Path {
        self.bin.parent().expect("binary has a parent dir")
    }

    /// Path relative to the test root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Run classpatch with empty stdin
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_stdin(args, "")
    }

    /// Run classpatch feeding `input` on stdin
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> TestResult {
        let mut child = Command::new(&self.bin)
            .current_dir(self.root.path())
            .env("CLASSPATCH_CONFIG", self.path("classpatch.toml"))
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn classpatch");

        // The child may exit before reading stdin (e.g. argument errors);
        // a broken pipe here is not a test failure.
        let _ = child
            .stdin
            .take()
            .expect("child stdin")
            .write_all(input.as_bytes());

        let output = child.wait_with_output().expect("wait for classpatch");
        output_to_result(output)
    }

    /// Write a config file pointing ssh/scp at stub programs
    pub fn write_transport_config(&self, ssh: &Path, scp: &Path) {
        let config = format!(
            "ssh = \"{}\"\nscp = \"{}\"\n",
            ssh.display(),
            scp.display()
        );
        std::fs::write(self.path("classpatch.toml"), config).expect("write config");
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
