//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ViewerError>`.

use thiserror::Error;

/// The main error type for the avatar viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// Any failure while loading or instantiating a model container.
    #[error("Failed to load model: {0}")]
    LoadFailed(String),

    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// A model load was requested while a previous one is still in flight.
    #[error("A model load is already in progress")]
    LoadInProgress,

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // HTTP & Network Errors
    // ========================================================================
    /// HTTP request error.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[cfg(feature = "http")]
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// HTTP response error with status code.
    #[cfg(feature = "http")]
    #[error("HTTP response error: status {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
