use std::io;

use thiserror::Error;

/// Error type for encoder I/O and invalid writer state.
///
/// Malformed input records are deliberately *not* represented here: a record
/// that fails to decode is skipped and counted, never surfaced as an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
}
