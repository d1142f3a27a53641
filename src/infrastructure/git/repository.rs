use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::domain::value_objects::tracking_status::TrackingStatus;
use crate::infrastructure::process::{CommandOutcome, ProcessError, ProcessRunner};

/// A git checkout directory plus the runner used to drive git inside it.
///
/// Non-checking calls ([`GitRepository::command`]) hand the exit status back
/// to the caller; checking calls fail with [`ProcessError::CommandFailed`].
#[derive(Debug, Clone)]
pub struct GitRepository {
    work_dir: PathBuf,
    runner: Arc<dyn ProcessRunner>,
}

fn to_args<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter().map(|a| a.as_ref().to_string()).collect()
}

impl GitRepository {
    pub fn new(work_dir: impl Into<PathBuf>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn runner(&self) -> &Arc<dyn ProcessRunner> {
        &self.runner
    }

    /// Whether the directory already holds an initialized checkout
    pub fn is_cloned(&self) -> bool {
        self.work_dir.join(".git").exists()
    }

    /// Run git without failing on a nonzero exit.
    pub fn command<S: AsRef<str>>(
        &self,
        args: &[S],
        capture_stdout: bool,
    ) -> Result<CommandOutcome, ProcessError> {
        self.runner
            .run(&self.work_dir, &to_args(args), capture_stdout)
    }

    /// Run git and fail unless it exits with status 0.
    pub fn check_command<S: AsRef<str>>(&self, args: &[S]) -> Result<(), ProcessError> {
        self.command(args, false)?.check().map(|_| ())
    }

    /// Run git, fail on nonzero exit, and return its trimmed stdout.
    pub fn check_output<S: AsRef<str>>(&self, args: &[S]) -> Result<String, ProcessError> {
        let outcome = self.command(args, true)?.check()?;
        Ok(outcome.trimmed_stdout().to_string())
    }

    /// Clone `url` into this repository's directory without checking out a work tree.
    ///
    /// The created remote is named `remote_name`. The clone is non-checking:
    /// its outcome is returned for the caller to judge.
    pub fn clone_from(&self, remote_name: &str, url: &str) -> Result<CommandOutcome, ProcessError> {
        let parent = self
            .work_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|source| ProcessError::Directory {
            path: parent.to_path_buf(),
            source,
        })?;

        let dest = self.work_dir.to_string_lossy().into_owned();
        let args = to_args(&["clone", "-o", remote_name, "-n", url, dest.as_str()]);
        self.runner.run(parent, &args, false)
    }

    /// Whether `HEAD` resolves to a commit
    pub fn head_resolves(&self) -> Result<bool, ProcessError> {
        Ok(self.command(&["show-ref", "-q", "HEAD"], false)?.success())
    }

    /// Whether `reference` names an existing object
    pub fn ref_exists(&self, reference: &str) -> Result<bool, ProcessError> {
        let outcome = self.command(&["rev-parse", "--verify", "-q", reference], true)?;
        Ok(outcome.success())
    }

    /// Whether a local branch called `branch` exists
    pub fn branch_exists(&self, branch: &str) -> Result<bool, ProcessError> {
        self.ref_exists(&format!("refs/heads/{branch}"))
    }

    /// Configured URL of `remote`, or `None` when the remote is not set up
    pub fn remote_url(&self, remote: &str) -> Result<Option<String>, ProcessError> {
        let key = format!("remote.{remote}.url");
        let outcome = self.command(&["config", "--get", key.as_str()], true)?;
        if outcome.success() {
            Ok(Some(outcome.trimmed_stdout().to_string()))
        } else {
            Ok(None)
        }
    }

    pub fn set_remote_url(&self, remote: &str, url: &str) -> Result<(), ProcessError> {
        let key = format!("remote.{remote}.url");
        self.check_command(&["config", "--replace-all", key.as_str(), url])
    }

    pub fn add_remote(&self, remote: &str, url: &str) -> Result<(), ProcessError> {
        self.check_command(&["remote", "add", remote, url])
    }

    /// Check out whatever `HEAD` points to, populating the work tree
    pub fn checkout_head(&self) -> Result<(), ProcessError> {
        self.check_command(&["checkout"])
    }

    pub fn checkout(&self, branch: &str) -> Result<(), ProcessError> {
        self.check_command(&["checkout", branch])
    }

    /// Create `branch` tracking `upstream` and switch to it
    pub fn checkout_new_tracking_branch(
        &self,
        branch: &str,
        upstream: &str,
    ) -> Result<(), ProcessError> {
        self.check_command(&["checkout", "--track", "-b", branch, upstream])
    }

    /// Create `branch` tracking `upstream` without switching to it
    pub fn create_tracking_branch(&self, branch: &str, upstream: &str) -> Result<(), ProcessError> {
        self.check_command(&["branch", "--track", branch, upstream])
    }

    /// Compare the histories of `local_ref` and `remote_ref`.
    pub fn tracking_status(
        &self,
        local_ref: &str,
        remote_ref: &str,
    ) -> Result<TrackingStatus, ProcessError> {
        let range = format!("{local_ref}...{remote_ref}");
        let args = ["rev-list", "--left-right", "--count", range.as_str()];
        let output = self.check_output(&args)?;

        TrackingStatus::parse_left_right_counts(&output).ok_or_else(|| {
            debug!(output = %output, "unexpected rev-list output");
            ProcessError::command_failed(to_args(&args), Some(0))
        })
    }
}
