/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Process execution (spawning the git executable)
/// - Git operations on a single checkout (clone, checkout, remotes, refs)
/// - File system operations (manifest documents)
pub mod filesystem;
pub mod git;
pub mod process;

// Re-export commonly used types
pub use filesystem::{ManifestFormat, ManifestStore, ManifestStoreError};
pub use git::GitRepository;
pub use process::{CommandOutcome, GitProcessRunner, ProcessError, ProcessRunner};
