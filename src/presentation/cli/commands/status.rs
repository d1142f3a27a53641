use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::Path;

use crate::application::use_cases::status_check::{ProjectStatus, StatusCheckUseCase};
use crate::domain::entities::manifest::Manifest;
use crate::presentation::cli::OutputFormat;

/// Handler for the status command
pub struct StatusCommand {
    pub projects: Vec<String>,
    pub output: OutputFormat,
}

impl StatusCommand {
    pub fn new(projects: Vec<String>, output: OutputFormat) -> Self {
        Self { projects, output }
    }

    pub fn execute(&self, manifest: &Manifest) -> Result<()> {
        let statuses = StatusCheckUseCase::new(self.projects.clone()).execute(manifest)?;

        match self.output {
            OutputFormat::Text => self.print_text(manifest, &statuses),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&statuses)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&statuses)?),
        }

        Ok(())
    }

    fn print_text(&self, manifest: &Manifest, statuses: &[ProjectStatus]) {
        let current_dir = env::current_dir().ok();

        for status in statuses {
            let location = display_dir(
                &manifest.base_dir().join(&status.dir),
                current_dir.as_deref(),
            );

            let state = match (&status.tracking, &status.error) {
                _ if !status.cloned => "not cloned".red(),
                (Some(tracking), _) if tracking.is_equal() => tracking.to_string().green(),
                (Some(tracking), _) => tracking.to_string().yellow(),
                (None, Some(error)) => error.red(),
                (None, None) => "unknown".dimmed(),
            };

            println!(
                "{} {} [{} -> {}] {}",
                status.name.bold(),
                location.dimmed(),
                status.tracking_branch.cyan(),
                status.remote_refspec,
                state
            );
        }
    }
}

/// Show `path` relative to the working directory when that is shorter
fn display_dir(path: &Path, current_dir: Option<&Path>) -> String {
    current_dir
        .and_then(|cwd| pathdiff::diff_paths(path, cwd))
        .filter(|relative| relative.components().count() < path.components().count())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
