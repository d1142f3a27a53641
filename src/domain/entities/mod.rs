pub mod manifest;
pub mod project;
pub mod remote;

pub use manifest::{Manifest, ManifestDocument, DEFAULT_REFSPEC};
pub use project::{Project, ProjectDocument};
pub use remote::Remote;
