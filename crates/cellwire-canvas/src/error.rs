use cellwire_common::{CanvasError, CanvasErrorKind};
use thiserror::Error;

/// Persistence-layer failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workspace io: {0}")]
    Io(#[from] std::io::Error),

    #[error("workspace json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for CanvasError {
    fn from(err: StoreError) -> Self {
        CanvasError::new(CanvasErrorKind::Workspace).with_message(err.to_string())
    }
}
