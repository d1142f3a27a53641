pub mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::domain::entities::manifest::Manifest;
use crate::infrastructure::filesystem::manifest_store::{ManifestStore, MANIFEST_CANDIDATES};
use crate::infrastructure::process::GitProcessRunner;
use commands::{DumpManifestCommand, StatusCommand, SyncCommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_DATE"),
    ")"
);

/// Output format options for status command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Encoding for dump-manifest
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

/// crepo - keep a set of git checkouts in line with a manifest
#[derive(Parser)]
#[command(name = "crepo")]
#[command(about = "Keep a set of git checkouts in line with a manifest")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Manifest file (defaults to manifest.json in the working directory)
    #[arg(short, long, global = true, env = "CREPO_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// git executable to run
    #[arg(long, global = true, env = "CREPO_GIT", default_value = "git")]
    pub git: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone missing projects, fix their remotes and check out tracking branches
    Sync {
        /// Projects to sync (all when omitted)
        projects: Vec<String>,

        /// Continue with the remaining projects after a failure
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Show how each tracking branch relates to its remote branch
    Status {
        /// Projects to check (all when omitted)
        projects: Vec<String>,

        /// Output format (text, json, yaml)
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Print the manifest with all defaults filled in
    DumpManifest {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: DocumentFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn run(self) -> Result<()> {
        self.init_logging();

        colored::control::set_override(!self.cli.no_color);

        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
        }

        match self.handle_command() {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    /// RUST_LOG wins; otherwise --verbose switches crepo logging to debug
    fn init_logging(&self) {
        let fallback = if self.cli.verbose {
            "crepo=debug"
        } else {
            "crepo=warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    fn handle_command(&self) -> Result<()> {
        let manifest = self.load_manifest()?;

        match &self.cli.command {
            Commands::Sync {
                projects,
                keep_going,
            } => SyncCommand::new(projects.clone(), *keep_going, self.cli.verbose).execute(&manifest),
            Commands::Status { projects, output } => {
                StatusCommand::new(projects.clone(), *output).execute(&manifest)
            }
            Commands::DumpManifest { format, output } => {
                DumpManifestCommand::new(*format, output.clone(), self.cli.verbose)
                    .execute(&manifest)
            }
        }
    }

    fn manifest_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.cli.manifest {
            return Ok(path.clone());
        }

        let current_dir = env::current_dir()?;
        ManifestStore::new()
            .find_manifest(&current_dir)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No manifest found in {} (looked for {})",
                    current_dir.display(),
                    MANIFEST_CANDIDATES.join(", ")
                )
            })
    }

    fn load_manifest(&self) -> Result<Manifest> {
        let path = self.manifest_path()?;
        let runner = Arc::new(GitProcessRunner::with_executable(&self.cli.git));
        Manifest::load_with_runner(&path, runner)
            .with_context(|| format!("Failed to load manifest {}", path.display()))
    }
}
