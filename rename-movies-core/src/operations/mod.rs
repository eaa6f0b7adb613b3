//! High-level operations that correspond to CLI commands
//!
//! These hold the batch flow, separated from CLI concerns like argument
//! parsing, terminal prompts and output formatting.

pub mod rename;

pub use rename::{rename_operation, RenameOptions};
