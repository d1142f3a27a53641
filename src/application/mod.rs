/// Application layer: workflows that drive projects of a loaded manifest
pub mod use_cases;
