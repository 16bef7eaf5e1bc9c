use std::path::PathBuf;

/// Errors that stop the server. Protocol-level problems (bad requests,
/// unknown tools, handler faults) are answered on the wire and never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Duplicate tool registration: '{0}'")]
    DuplicateTool(String),

    #[error("Cannot open log file {}: {detail}", path.display())]
    LogFile { path: PathBuf, detail: String },

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
