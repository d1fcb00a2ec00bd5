use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a conversion run.
///
/// A missing source folder is not one of them when the config checks for it;
/// see [`crate::ConvertOutcome::FolderMissing`].
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to check folder '{}': {source}", path.display())]
    CheckFolder { path: PathBuf, source: io::Error },

    #[error("Unable to read directory '{}': {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("Unable to read file '{}': {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("Unable to write '{}': {source}", path.display())]
    WriteOutput { path: PathBuf, source: io::Error },

    #[error("Failed to serialize conversion results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write console output: {0}")]
    Console(#[source] io::Error),

    #[error("Invalid config file '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}
