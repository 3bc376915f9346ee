//! Error types
//!
//! Errors surfaced by the callback registry. Log classification never fails.

use crate::callbacks::StopError;

/// Result alias for registry operations
pub type Result<T> = std::result::Result<T, CallbackError>;

/// Error type for registry operations
#[derive(Debug)]
pub enum CallbackError {
    /// `add_bin`/`remove_bin` called before the pipeline owner installed hooks
    BinHooksNotSet,
    /// One or more stop handlers failed
    Stop(StopError),
}

impl std::fmt::Display for CallbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallbackError::BinHooksNotSet => write!(f, "Pipeline bin hooks not set"),
            CallbackError::Stop(e) => write!(f, "Stop failed: {}", e),
        }
    }
}

impl std::error::Error for CallbackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallbackError::BinHooksNotSet => None,
            CallbackError::Stop(e) => Some(e),
        }
    }
}

impl From<StopError> for CallbackError {
    fn from(e: StopError) -> Self {
        CallbackError::Stop(e)
    }
}
