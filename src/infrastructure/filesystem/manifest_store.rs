use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::common::error::{ConfigError, CrepoError};
use crate::common::result::CrepoResult;
use crate::domain::entities::manifest::ManifestDocument;

/// File names probed, in order, when no manifest path is given
pub const MANIFEST_CANDIDATES: &[&str] = &[
    "manifest.json",
    "manifest.yml",
    "manifest.yaml",
    ".crepo/manifest.json",
];

/// Manifest store related errors
#[derive(Debug, Error)]
pub enum ManifestStoreError {
    #[error("Manifest file not found at path: {}", .0.display())]
    ManifestFileNotFound(PathBuf),

    #[error("Manifest file read failed for {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest file write failed for {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// On-disk encoding of a manifest document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// `.yml`/`.yaml` files are YAML, everything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Reads and writes manifest documents
#[derive(Debug, Default, Clone)]
pub struct ManifestStore;

impl ManifestStore {
    pub fn new() -> Self {
        Self
    }

    /// Look for a manifest in `dir` using [`MANIFEST_CANDIDATES`]
    pub fn find_manifest(&self, dir: &Path) -> Option<PathBuf> {
        MANIFEST_CANDIDATES
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|path| path.is_file())
    }

    /// Read and parse the document at `path`
    pub fn read_document(&self, path: &Path) -> CrepoResult<ManifestDocument> {
        if !path.is_file() {
            return Err(ManifestStoreError::ManifestFileNotFound(path.to_path_buf()).into());
        }

        debug!(path = %path.display(), "reading manifest");
        let content = fs::read_to_string(path).map_err(|source| ManifestStoreError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse_document(
            &content,
            ManifestFormat::from_path(path),
            Some(path),
        )?)
    }

    /// Absolute directory containing `path`
    pub fn base_dir_of(&self, path: &Path) -> CrepoResult<PathBuf> {
        let absolute = fs::canonicalize(path).map_err(|source| ManifestStoreError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(absolute))
    }

    /// Parse manifest text; every structural problem becomes a [`ConfigError::Parse`]
    pub fn parse_document(
        content: &str,
        format: ManifestFormat,
        path: Option<&Path>,
    ) -> Result<ManifestDocument, ConfigError> {
        let parsed = match format {
            ManifestFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ManifestFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::parse(message, path.map(Path::to_path_buf)))
    }

    /// Encode a document; JSON is pretty-printed with two-space indentation
    pub fn render_document(
        document: &ManifestDocument,
        format: ManifestFormat,
    ) -> CrepoResult<String> {
        let rendered = match format {
            ManifestFormat::Json => serde_json::to_string_pretty(document)?,
            ManifestFormat::Yaml => serde_yaml::to_string(document)?,
        };
        Ok(rendered)
    }

    /// Write a document to `path`, choosing the format from its extension
    pub fn write_document(&self, path: &Path, document: &ManifestDocument) -> CrepoResult<()> {
        let mut rendered = Self::render_document(document, ManifestFormat::from_path(path))?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        fs::write(path, rendered).map_err(|source| {
            CrepoError::from(ManifestStoreError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })
        })
    }
}
