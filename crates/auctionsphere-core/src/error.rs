//! Error types for auctionsphere-core
//!
//! Most client operations cannot fail: validators classify, the access guard reports an
//! outcome. What remains are storage and (de)serialization failures plus the account
//! operations that reject input.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backing store could not be read or written
    StorageError,
    /// Stored value is not the JSON we expect
    SerializationError,
    /// Email/password pair did not match a stored user
    InvalidCredentials,
    /// Form input failed validation
    ValidationError,
    /// Duplicate entry
    DuplicateEntry,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
            ErrorCode::SerializationError => write!(f, "SERIALIZATION_ERROR"),
            ErrorCode::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// User input problem, nothing is broken
    Warning,
    /// Operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for auctionsphere-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Malformed value under '{key}': {message}")]
    Serialization { key: String, message: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Duplicate entry: {entry}")]
    DuplicateEntry { entry: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Storage { .. } => ErrorCode::StorageError,
            CoreError::Serialization { .. } => ErrorCode::SerializationError,
            CoreError::InvalidCredentials => ErrorCode::InvalidCredentials,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Storage { .. } => ErrorSeverity::Error,
            CoreError::Serialization { .. } => ErrorSeverity::Error,
            CoreError::InvalidCredentials => ErrorSeverity::Warning,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::DuplicateEntry { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Storage { .. } => details
                .with_suggestion("Check that the storage file is readable and writable.".to_string()),
            CoreError::Serialization { key, .. } => details
                .with_suggestion(format!("Inspect or remove the '{}' entry in storage.", key))
                .with_suggestion("Running `init` recreates missing collections.".to_string()),
            CoreError::InvalidCredentials => details.with_suggestion(
                "Run `demo` to create the demo accounts and print their credentials.".to_string(),
            ),
            CoreError::DuplicateEntry { .. } => {
                details.with_suggestion("Sign in with the existing account instead.".to_string())
            }
            CoreError::ValidationError { .. } => details,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(error: io::Error) -> Self {
        CoreError::Storage {
            message: error.to_string(),
        }
    }
}

// ==================== Tests ====================
