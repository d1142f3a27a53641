/// Presentation layer: the `crepo` command line
pub mod cli;
