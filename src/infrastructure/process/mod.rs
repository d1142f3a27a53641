pub mod process_runner;

pub use process_runner::{CommandOutcome, GitProcessRunner, ProcessError, ProcessRunner};
