//! Error types for the Parlor domain.
//!
//! Prompt assembly itself never fails; these errors cover the edges where
//! records enter the system (transcript files, configuration, I/O).

use thiserror::Error;

/// The top-level error type for Parlor operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Input errors ---
    #[error("Invalid transcript: {0}")]
    Transcript(String),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- I/O ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
