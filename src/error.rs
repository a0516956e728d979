//! Error types for catador
//!
//! A single crate-wide error enum plus a `Result` alias. Handlers translate
//! these into structured HTTP error bodies; nothing in the serving path
//! surfaces a raw panic to a client.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum CatadorError {
    /// I/O failure while reading an artifact or binding the server
    #[error("I/O error: {message}")]
    IoError {
        /// Human-readable description including the path involved
        message: String,
    },

    /// Artifact bytes were readable but not parseable
    #[error("Format error: {message}")]
    FormatError {
        /// Human-readable description of the parse failure
        message: String,
    },

    /// Artifact parsed but its dimensions or structure are inconsistent
    #[error("Invalid shape: {reason}")]
    InvalidShape {
        /// What was inconsistent
        reason: String,
    },

    /// A required artifact is not loaded
    #[error("Artifact unavailable: {artifact}")]
    ArtifactUnavailable {
        /// Which artifact ("model" or "scaler")
        artifact: String,
    },

    /// Server lifecycle failure (bad address, bind error)
    #[error("Server error: {message}")]
    ServerError {
        /// Human-readable description
        message: String,
    },
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, CatadorError>;
