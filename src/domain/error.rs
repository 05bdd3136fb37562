use thiserror::Error;

use crate::elements::ElementId;

/// Setup-time failures. Tool operations themselves never fail; they degrade to no-ops.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid editor config: {0}")]
    InvalidConfig(String),

    #[error("content bundle: duplicate element id {0}")]
    DuplicateElement(ElementId),

    #[error("content bundle: element id {0} is missing")]
    MissingElement(usize),

    #[error("content bundle: element id {0} does not fit in u8")]
    ElementIdOutOfRange(u16),
}
