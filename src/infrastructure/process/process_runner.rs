use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

/// Process runner errors
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to spawn '{program}' in {}: {source}", .work_dir.display())]
    Spawn {
        program: String,
        work_dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `git {}` failed ({})", .args.join(" "), describe_exit(.exit_code))]
    CommandFailed {
        args: Vec<String>,
        exit_code: Option<i32>,
    },

    #[error("Failed to prepare directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl ProcessError {
    /// Create a command failed error
    pub fn command_failed(args: Vec<String>, exit_code: Option<i32>) -> Self {
        Self::CommandFailed { args, exit_code }
    }

    /// Exit code of a failed command, if the process exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

/// Result of a non-checking invocation.
///
/// A nonzero exit is an ordinary value here; call [`CommandOutcome::check`]
/// to turn it into a [`ProcessError::CommandFailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Arguments passed to the executable
    pub args: Vec<String>,

    /// Exit code, `None` when the process was killed by a signal
    pub exit_code: Option<i32>,

    /// Captured standard output, when capture was requested
    pub stdout: Option<String>,
}

impl CommandOutcome {
    pub fn new(args: Vec<String>, exit_code: Option<i32>, stdout: Option<String>) -> Self {
        Self {
            args,
            exit_code,
            stdout,
        }
    }

    /// Whether the command exited with status 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Captured stdout with surrounding whitespace removed
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.as_deref().map(str::trim).unwrap_or("")
    }

    /// Fail with [`ProcessError::CommandFailed`] unless the command succeeded
    pub fn check(self) -> Result<Self, ProcessError> {
        if self.success() {
            Ok(self)
        } else {
            Err(ProcessError::command_failed(self.args, self.exit_code))
        }
    }
}

/// Spawns the version-control executable and waits for it.
pub trait ProcessRunner: Send + Sync + fmt::Debug {
    /// Run the executable with `args` inside `work_dir`.
    ///
    /// Stdout is captured only when `capture_stdout` is set; otherwise it is
    /// inherited from the caller. Errors are reserved for failures to spawn.
    fn run(
        &self,
        work_dir: &Path,
        args: &[String],
        capture_stdout: bool,
    ) -> Result<CommandOutcome, ProcessError>;
}

/// Runs the system git executable
#[derive(Debug, Clone)]
pub struct GitProcessRunner {
    git_executable: String,
}

impl Default for GitProcessRunner {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
        }
    }
}

impl GitProcessRunner {
    /// Create a runner for the `git` found on PATH
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with a custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            git_executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.git_executable
    }
}

impl ProcessRunner for GitProcessRunner {
    fn run(
        &self,
        work_dir: &Path,
        args: &[String],
        capture_stdout: bool,
    ) -> Result<CommandOutcome, ProcessError> {
        debug!(
            dir = %work_dir.display(),
            "{} {}",
            self.git_executable,
            args.join(" ")
        );

        let mut cmd = Command::new(&self.git_executable);
        cmd.args(args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());

        let spawn_error = |source: std::io::Error| ProcessError::Spawn {
            program: self.git_executable.clone(),
            work_dir: work_dir.to_path_buf(),
            source,
        };

        let outcome = if capture_stdout {
            let output = cmd.stdout(Stdio::piped()).output().map_err(spawn_error)?;
            CommandOutcome::new(
                args.to_vec(),
                output.status.code(),
                Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            )
        } else {
            let status = cmd.stdout(Stdio::inherit()).status().map_err(spawn_error)?;
            CommandOutcome::new(args.to_vec(), status.code(), None)
        };

        if !outcome.success() {
            debug!(exit_code = ?outcome.exit_code, "git exited with nonzero status");
        }

        Ok(outcome)
    }
}
