// SPDX-License-Identifier: MPL-2.0

//! Error types for the capture pipeline

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// A capture request ended in failure
    Capture(FailureReason),
    /// Generic error with message
    Other(String),
}

/// Why a capture request failed
///
/// Callers that only care about success can collapse this with
/// [`crate::pipelines::capture::CaptureOutcome::into_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The camera could not be bound for the requested facing
    Bind(String),
    /// The device reported a capture error
    Capture(String),
    /// The output location could not be prepared
    Storage(String),
    /// The capture worker panicked or was cancelled
    Worker(String),
}

impl FailureReason {
    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            FailureReason::Bind(_) => "bind",
            FailureReason::Capture(_) => "capture",
            FailureReason::Storage(_) => "storage",
            FailureReason::Worker(_) => "worker",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Bind(msg) => write!(f, "Failed to bind camera: {}", msg),
            FailureReason::Capture(msg) => write!(f, "Failed to capture photo: {}", msg),
            FailureReason::Storage(msg) => write!(f, "Failed to prepare output: {}", msg),
            FailureReason::Worker(msg) => write!(f, "Capture worker failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for FailureReason {}

impl From<FailureReason> for AppError {
    fn from(err: FailureReason) -> Self {
        AppError::Capture(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
