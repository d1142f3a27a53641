pub mod dump_manifest;
pub mod status;
pub mod sync;

pub use dump_manifest::*;
pub use status::*;
pub use sync::*;
