use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::domain::entities::manifest::Manifest;
use crate::infrastructure::filesystem::manifest_store::{ManifestFormat, ManifestStore};
use crate::presentation::cli::DocumentFormat;

/// Handler for the dump-manifest command
pub struct DumpManifestCommand {
    pub format: DocumentFormat,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
}

impl DumpManifestCommand {
    pub fn new(format: DocumentFormat, output_file: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            format,
            output_file,
            verbose,
        }
    }

    pub fn execute(&self, manifest: &Manifest) -> Result<()> {
        let format = match self.format {
            DocumentFormat::Json => ManifestFormat::Json,
            DocumentFormat::Yaml => ManifestFormat::Yaml,
        };
        let content = ManifestStore::render_document(&manifest.to_document(), format)?;

        match &self.output_file {
            Some(path) => {
                std::fs::write(path, format!("{}\n", content.trim_end()))?;
                println!(
                    "{} Manifest dumped to: {}",
                    "✓".green().bold(),
                    path.display().to_string().bold()
                );
                if self.verbose {
                    println!("  Projects: {}", manifest.project_count());
                }
            }
            None => println!("{}", content.trim_end()),
        }

        Ok(())
    }
}
