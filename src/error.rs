use thiserror::Error;

/// Failures surfaced by the store and repository layers.
///
/// There is no transient-failure class in a synchronous local-storage model:
/// everything here is either invalid input or corrupt state, and both are
/// propagated to the caller rather than recovered from.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored bytes for a collection could not be parsed into the expected
    /// shape. Never coerced into an empty list, since that would mask data
    /// loss.
    #[error("corrupt data in collection '{collection}': {detail}")]
    CorruptData { collection: String, detail: String },

    /// An entity violates a data-model invariant. Raised before any
    /// persistence attempt; storage is left untouched.
    #[error("invalid {entity}: {reason}")]
    Validation {
        entity: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
