/*!
 * Error types for the flowlingo library.
 *
 * This module contains custom error types for the different stages of the
 * localization pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation engine
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The engine answered with a different number of strings than it was sent
    #[error("Engine returned {actual} translations for {expected} texts")]
    ResponseMismatch {
        /// Number of texts sent
        expected: usize,
        /// Number of translations received
        actual: usize,
    },
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while scanning or rewriting a workflow document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// The document cannot be treated as an object at all
    #[error("Failed to parse workflow: {0}")]
    Parse(String),

    /// A single path could not be written back into the document
    #[error("Cannot resolve path '{path}': {reason}")]
    PathResolution {
        /// Textual form of the offending path
        path: String,
        /// What went wrong along the path
        reason: String,
    },

    /// A textual path could not be parsed into segments
    #[error("Invalid document path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the engine backend
    #[error("Translation failed: {0}")]
    Engine(#[from] ProviderError),

    /// Requested engine name is not known
    #[error("Unsupported translation engine: {0}")]
    UnsupportedEngine(String),

    /// A job was asked to move between states it cannot move between
    #[error("Invalid job transition from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from an engine
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document scanning or integration
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Workflow(WorkflowError::Parse(error.to_string()))
    }
}
