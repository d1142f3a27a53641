use anyhow::Result;
use colored::Colorize;

use crate::application::use_cases::sync_projects::{
    SyncProjectsConfig, SyncProjectsError, SyncProjectsUseCase,
};
use crate::domain::entities::manifest::Manifest;

/// Handler for the sync command
pub struct SyncCommand {
    pub projects: Vec<String>,
    pub keep_going: bool,
    pub verbose: bool,
}

impl SyncCommand {
    pub fn new(projects: Vec<String>, keep_going: bool, verbose: bool) -> Self {
        Self {
            projects,
            keep_going,
            verbose,
        }
    }

    pub fn execute(&self, manifest: &Manifest) -> Result<()> {
        let config = SyncProjectsConfig::default()
            .with_projects(self.projects.clone())
            .with_keep_going(self.keep_going);
        let use_case = SyncProjectsUseCase::new(config);

        println!("{} Synchronizing projects...", "::".blue().bold());

        match use_case.execute(manifest) {
            Ok(result) => {
                if self.verbose {
                    println!("  Projects synced: {}", result.synced_count);
                    println!("  New projects cloned: {}", result.cloned_count);
                }

                if result.is_success() {
                    println!("{} Synchronization completed!", "✓".green().bold());
                    return Ok(());
                }

                println!("{} Some projects failed:", "⚠".yellow().bold());
                for (project, error) in &result.failures {
                    println!("  {}: {}", project.bold(), error.to_string().red());
                }
                Err(anyhow::anyhow!(
                    "{} of {} projects failed to sync",
                    result.failures.len(),
                    result.failures.len() + result.synced_count
                ))
            }
            Err(e @ SyncProjectsError::Selection(_)) => Err(e.into()),
            Err(e) => Err(anyhow::anyhow!("Failed to synchronize projects: {}", e)),
        }
    }
}
