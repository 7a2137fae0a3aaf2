//! Error types for canvas operations.

use thiserror::Error;

/// Result type for EmojiArt operations.
pub type EmojiArtResult<T> = Result<T, EmojiArtError>;

/// Errors that can occur in EmojiArt operations.
#[derive(Debug, Error)]
pub enum EmojiArtError {
    /// Emoji not found in the document.
    #[error("Emoji not found: {0}")]
    EmojiNotFound(String),

    /// Invalid operation on the document.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Background image bytes could not be decoded.
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),
}
