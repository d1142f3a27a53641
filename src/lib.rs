//! # crepo - manifest-driven git checkouts
//!
//! `crepo` keeps a set of independent git checkouts ("projects") consistent with a
//! declarative manifest: every project is cloned from its designated remote, has
//! all of its declared remotes configured with the right URLs, and has a local
//! tracking branch for the ref it follows.
//!
//! ## Manifest
//!
//! ```json
//! {
//!   "default-revision": "master",
//!   "default-remote": "origin",
//!   "remotes": {
//!     "origin": { "fetch": "git://github.com/example/%(name)s.git" },
//!     "mirror": { "fetch": "ssh://mirror.example.com/%(name)s.git" }
//!   },
//!   "projects": {
//!     "hadoop": {},
//!     "hbase": { "remotes": ["origin", "mirror"], "from-remote": "mirror", "refspec": "cdh3" }
//!   }
//! }
//! ```
//!
//! Each remote's `fetch` template carries exactly one `%(name)s` slot, filled with
//! the project's `remote-project-name` (defaulting to the project name).
//!
//! ## Architecture
//!
//! - [`domain`]: manifest, remotes, projects and their synchronization operations
//! - [`application`]: use cases driving every project of a manifest
//! - [`infrastructure`]: git subprocesses and manifest files
//! - [`presentation`]: CLI interface
//! - [`common`]: shared error handling
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use crepo::domain::entities::manifest::Manifest;
//!
//! # fn example() -> crepo::Result<()> {
//! let manifest = Manifest::load("manifest.json")?;
//!
//! for project in manifest.projects() {
//!     project.clone_repository()?;
//!     project.ensure_remotes()?;
//!     project.checkout_tracking_branch()?;
//!     println!("{}: {}", project.name(), project.tracking_status()?);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::{ConfigError, CrepoError};
pub use crate::common::result::CrepoResult as Result;
