//! The error type for conversion requests.

use quire_idf::TreeError;
use quire_mapping::MapError;
use thiserror::Error;

/// Failures that abort a conversion. Font and image problems never reach
/// this type; they degrade to warnings or alt text instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Input tree error: {0}")]
    Tree(#[from] TreeError),
    #[error("Mapping error: {0}")]
    Map(#[from] MapError),
}
