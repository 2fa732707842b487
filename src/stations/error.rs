use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Reference file not found at '{0}'")]
    FileNotFound(PathBuf),

    #[error("Failed to read reference file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Malformed station record on line {line}: {message}")]
    MalformedStation { line: usize, message: String },

    #[error("Malformed inventory record on line {line}: {message}")]
    MalformedInventory { line: usize, message: String },
}
