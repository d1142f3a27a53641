//! In-memory stand-in for the git executable
//!
//! Understands the handful of argument vectors crepo issues, keeps per-checkout
//! state (remotes, local branches) and records every call for verification.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crepo::infrastructure::process::{CommandOutcome, ProcessError, ProcessRunner};

/// State of one fake checkout
#[derive(Debug, Default, Clone)]
pub struct FakeCheckout {
    pub remotes: BTreeMap<String, String>,
    pub branches: BTreeSet<String>,
    pub checked_out: Option<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    checkouts: HashMap<PathBuf, FakeCheckout>,
    calls: Vec<(PathBuf, Vec<String>)>,
}

/// Recording git double
#[derive(Debug)]
pub struct FakeGit {
    /// Branch the upstream HEAD points at; `None` means HEAD does not resolve after cloning
    remote_head: Option<String>,
    /// Upstream refs that `branch --track`/`checkout --track` accept; empty accepts any
    remote_branches: BTreeSet<String>,
    /// Commands (first argument) that exit with 1
    failing: BTreeSet<String>,
    /// Stdout of `rev-list --left-right --count`
    rev_list_output: String,
    state: Mutex<FakeState>,
}

impl Default for FakeGit {
    fn default() -> Self {
        Self {
            remote_head: Some("master".to_string()),
            remote_branches: BTreeSet::new(),
            failing: BTreeSet::new(),
            rev_list_output: "0\t0\n".to_string(),
            state: Mutex::new(FakeState::default()),
        }
    }
}

/// Commands that change a checkout
const MUTATING: &[&str] = &["clone", "remote", "branch"];

fn is_mutating(args: &[String]) -> bool {
    let first = args.first().map(String::as_str).unwrap_or("");
    MUTATING.contains(&first)
        || (first == "config" && args.get(1).map(String::as_str) == Some("--replace-all"))
        || (first == "checkout" && args.iter().any(|a| a == "-b"))
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote_head(mut self, head: Option<&str>) -> Self {
        self.remote_head = head.map(str::to_string);
        self
    }

    pub fn with_remote_branches(mut self, refs: &[&str]) -> Self {
        self.remote_branches = refs.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn failing(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    pub fn with_rev_list_output(mut self, output: &str) -> Self {
        self.rev_list_output = output.to_string();
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Every recorded argument vector, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        let state = self.state.lock().unwrap();
        state.calls.iter().map(|(_, args)| args.clone()).collect()
    }

    /// Recorded calls rendered as space-joined strings
    pub fn call_lines(&self) -> Vec<String> {
        self.calls().iter().map(|args| args.join(" ")).collect()
    }

    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|args| is_mutating(args))
            .map(|args| args.join(" "))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn checkout(&self, dir: &Path) -> Option<FakeCheckout> {
        self.state.lock().unwrap().checkouts.get(dir).cloned()
    }

    /// Pretend `dir` was cloned earlier with the given remotes and branches
    pub fn seed_checkout(&self, dir: &Path, remotes: &[(&str, &str)], branches: &[&str]) {
        std::fs::create_dir_all(dir.join(".git")).unwrap();
        let checkout = FakeCheckout {
            remotes: remotes
                .iter()
                .map(|(n, u)| (n.to_string(), u.to_string()))
                .collect(),
            branches: branches.iter().map(|b| b.to_string()).collect(),
            checked_out: branches.first().map(|b| b.to_string()),
        };
        self.state
            .lock()
            .unwrap()
            .checkouts
            .insert(dir.to_path_buf(), checkout);
    }

    fn accepts_upstream(&self, upstream: &str) -> bool {
        self.remote_branches.is_empty() || self.remote_branches.contains(upstream)
    }

    fn simulate(&self, state: &mut FakeState, work_dir: &Path, args: &[String]) -> (i32, String) {
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();

        if let Some(first) = argv.first() {
            if self.failing.contains(*first) {
                return (1, String::new());
            }
        }

        match argv.as_slice() {
            ["clone", "-o", remote, "-n", url, dest] => {
                let dest = PathBuf::from(dest);
                std::fs::create_dir_all(dest.join(".git")).unwrap();
                let mut checkout = FakeCheckout::default();
                checkout.remotes.insert(remote.to_string(), url.to_string());
                if let Some(head) = &self.remote_head {
                    checkout.branches.insert(head.clone());
                }
                state.checkouts.insert(dest, checkout);
                (0, String::new())
            }
            _ => {
                let head = self.remote_head.clone();
                let accepts = |upstream: &str| self.accepts_upstream(upstream);
                let checkout = state.checkouts.entry(work_dir.to_path_buf()).or_default();
                match argv.as_slice() {
                    ["show-ref", "-q", "HEAD"] => (if head.is_some() { 0 } else { 1 }, String::new()),
                    ["checkout"] => {
                        checkout.checked_out = head;
                        (0, String::new())
                    }
                    ["checkout", "--track", "-b", branch, upstream] => {
                        if !accepts(upstream) || checkout.branches.contains(*branch) {
                            return (128, String::new());
                        }
                        checkout.branches.insert(branch.to_string());
                        checkout.checked_out = Some(branch.to_string());
                        (0, String::new())
                    }
                    ["checkout", branch] => {
                        if checkout.branches.contains(*branch) {
                            checkout.checked_out = Some(branch.to_string());
                            (0, String::new())
                        } else {
                            (1, String::new())
                        }
                    }
                    ["config", "--get", key] => {
                        let name = key
                            .strip_prefix("remote.")
                            .and_then(|k| k.strip_suffix(".url"))
                            .unwrap_or("");
                        match checkout.remotes.get(name) {
                            Some(url) => (0, format!("{url}\n")),
                            None => (1, String::new()),
                        }
                    }
                    ["config", "--replace-all", key, url] => {
                        let name = key
                            .strip_prefix("remote.")
                            .and_then(|k| k.strip_suffix(".url"))
                            .unwrap_or("");
                        checkout.remotes.insert(name.to_string(), url.to_string());
                        (0, String::new())
                    }
                    ["remote", "add", name, url] => {
                        if checkout.remotes.contains_key(*name) {
                            return (3, String::new());
                        }
                        checkout.remotes.insert(name.to_string(), url.to_string());
                        (0, String::new())
                    }
                    ["rev-parse", "--verify", "-q", reference] => {
                        let exists = reference
                            .strip_prefix("refs/heads/")
                            .map(|b| checkout.branches.contains(b))
                            .unwrap_or(false);
                        (if exists { 0 } else { 1 }, String::new())
                    }
                    ["branch", "--track", branch, upstream] => {
                        if !accepts(upstream) || checkout.branches.contains(*branch) {
                            return (128, String::new());
                        }
                        checkout.branches.insert(branch.to_string());
                        (0, String::new())
                    }
                    ["rev-list", "--left-right", "--count", _range] => {
                        (0, self.rev_list_output.clone())
                    }
                    _ => (129, String::new()),
                }
            }
        }
    }
}

impl ProcessRunner for FakeGit {
    fn run(
        &self,
        work_dir: &Path,
        args: &[String],
        capture_stdout: bool,
    ) -> Result<CommandOutcome, ProcessError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((work_dir.to_path_buf(), args.to_vec()));
        let (exit_code, stdout) = self.simulate(&mut state, work_dir, args);
        Ok(CommandOutcome::new(
            args.to_vec(),
            Some(exit_code),
            capture_stdout.then_some(stdout),
        ))
    }
}
