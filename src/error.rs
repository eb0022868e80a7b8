// src/error.rs
// Standardized error types for the TestRail MCP server

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum TestRailError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream answered with a non-success status
    #[error("TestRail API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The pagination loop ran past its safety cap
    #[error("pagination did not terminate after {pages} pages")]
    PaginationLimit { pages: usize },

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<TestRailError>,
    },

    #[error("unknown error: {0}")]
    Other(String),
}

/// Convenience type alias for Result using TestRailError
pub type Result<T> = std::result::Result<T, TestRailError>;

impl TestRailError {
    /// Wrap this error with a human-readable context message
    pub fn context(self, context: impl Into<String>) -> Self {
        TestRailError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping any context wrappers
    pub fn root_cause(&self) -> &TestRailError {
        match self {
            TestRailError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Convert to user-facing string for MCP tool boundaries
    pub fn to_user_string(&self) -> String {
        self.to_string()
    }
}

impl From<String> for TestRailError {
    fn from(s: String) -> Self {
        TestRailError::Other(s)
    }
}

impl From<TestRailError> for String {
    fn from(err: TestRailError) -> Self {
        err.to_string()
    }
}
