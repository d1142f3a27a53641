pub mod manifest_store;

pub use manifest_store::{ManifestFormat, ManifestStore, ManifestStoreError};
