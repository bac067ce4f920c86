//! Command-line tooling: argument parsing, text output, interactive browsing.

pub mod browse;
pub mod cli;
pub mod format;
