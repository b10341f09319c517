use thiserror::Error;

/// Failures inside application lifecycle hooks or the reload shim.
///
/// Only [`Runtime::mount`](crate::Runtime::mount) and the shim's reload path
/// surface these; capture and teardown collapse them into defaults.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to mount application: {0}")]
    Mount(String),

    #[error("Failed to capture application state: {0}")]
    Capture(String),

    #[error("Failed to tear down application: {0}")]
    Teardown(String),

    #[error("Failed to load bundle: {0}")]
    Load(String),

    #[error("Malformed channel message: {0}")]
    Protocol(#[from] serde_json::Error),
}

pub type Result<T, E = RuntimeError> = std::result::Result<T, E>;
