use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::filesystem::manifest_store::ManifestStoreError;
use crate::infrastructure::process::ProcessError;

/// Errors raised while building a manifest and its projects.
///
/// All of these are detected before any git command runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse manifest{}: {message}", display_path(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Default remote '{remote}' is not declared in the manifest remotes")]
    UnknownDefaultRemote { remote: String },

    #[error("Project '{project}' references undeclared remote '{remote}'")]
    UnknownRemote { project: String, remote: String },

    #[error("Project '{project}' lists no remotes")]
    EmptyRemotes { project: String },

    #[error("No from-remote listed for project '{project}', and more than one remote")]
    AmbiguousFromRemote { project: String },

    #[error("From-remote '{remote}' of project '{project}' is not one of its remotes")]
    FromRemoteNotListed { project: String, remote: String },

    #[error("Project '{name}' already in manifest")]
    DuplicateProject { name: String },

    #[error("Project declared under '{key}' names itself '{name}'")]
    ProjectNameMismatch { key: String, name: String },

    #[error("Project '{name}' is not in the manifest")]
    UnknownProject { name: String },

    #[error("Invalid fetch template '{template}': {reason}")]
    InvalidFetchTemplate { template: String, reason: String },

    #[error("Remote '{remote}' has no fetch URL")]
    MissingFetch { remote: String },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    pub fn parse(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Parse {
            path,
            message: message.into(),
        }
    }

    pub fn invalid_fetch_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFetchTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CrepoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("Manifest store error: {0}")]
    ManifestStore(#[from] ManifestStoreError),

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CrepoError {
    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the failure came from the manifest rather than from git.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<serde_yaml::Error> for CrepoError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML serialization failed", error)
    }
}

impl From<serde_json::Error> for CrepoError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}
