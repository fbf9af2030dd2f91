use thiserror::Error;

/// Failures that end a run with a message for the user rather than a bare I/O error
#[derive(Debug, Error)]
pub enum SniffError {
    #[error("{tool} not found. Please ensure it is installed and in your PATH")]
    ToolNotFound { tool: String },
    #[error("No reads found or parsed. Please check your input file")]
    NoData,
}
