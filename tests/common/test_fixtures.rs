//! Test fixtures for creating test data
//!
//! Manifest documents and on-disk manifest files shared by the integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crepo::domain::entities::{Manifest, ManifestDocument, ProjectDocument, Remote};
use tempfile::TempDir;

use super::fake_git::FakeGit;

/// Test fixture for manifest documents
pub struct ManifestFixture;

impl ManifestFixture {
    /// Single `origin` remote and one project `p1`
    pub fn single_project() -> ManifestDocument {
        ManifestDocument::new("origin")
            .with_remote("origin", remote("git://example.com/%(name)s.git"))
            .with_project("p1", ProjectDocument::new())
    }

    /// Two remotes and projects exercising every from-remote rule
    pub fn multi_remote() -> ManifestDocument {
        ManifestDocument::new("origin")
            .with_remote("origin", remote("git://example.com/%(name)s.git"))
            .with_remote("mirror", remote("ssh://mirror.example.com/%(name)s.git"))
            .with_project(
                "alpha",
                ProjectDocument::new().with_remotes(["origin", "mirror"]),
            )
            .with_project(
                "beta",
                ProjectDocument::new()
                    .with_remotes(["origin", "mirror"])
                    .with_from_remote("mirror")
                    .with_refspec("cdh3"),
            )
            .with_project("gamma", ProjectDocument::new().with_remotes(["mirror"]))
    }
}

pub fn remote(template: &str) -> Remote {
    Remote::from_template(template).unwrap()
}

/// Build a manifest rooted in `base_dir` that talks to `git`
pub fn manifest_with_fake(
    document: ManifestDocument,
    base_dir: &Path,
    git: &Arc<FakeGit>,
) -> Manifest {
    Manifest::from_document_with_runner(document, base_dir, git.clone()).unwrap()
}

/// Write `content` as `file_name` in a fresh temporary directory
pub fn write_manifest_file(file_name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(file_name);
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// The two-remote manifest used by the loading tests, in JSON
pub const MULTI_REMOTE_JSON: &str = r#"{
  "default-remote": "origin",
  "remotes": {
    "origin": { "fetch": "git://example.com/%(name)s.git" },
    "mirror": { "fetch": "ssh://mirror.example.com/%(name)s.git" }
  },
  "projects": {
    "hadoop": {},
    "hbase": {
      "remotes": ["origin", "mirror"],
      "from-remote": "mirror",
      "refspec": "cdh3",
      "dir": "src/hbase",
      "remote-project-name": "hbase-mirror"
    }
  }
}
"#;

/// Same manifest in YAML
pub const MULTI_REMOTE_YAML: &str = r#"default-remote: origin
remotes:
  origin:
    fetch: "git://example.com/%(name)s.git"
  mirror:
    fetch: "ssh://mirror.example.com/%(name)s.git"
projects:
  hadoop: {}
  hbase:
    remotes: [origin, mirror]
    from-remote: mirror
    refspec: cdh3
    dir: src/hbase
    remote-project-name: hbase-mirror
"#;
