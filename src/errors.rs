use thiserror::Error;

/// Errors that can occur while building context bundles.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("read error: {message} (path: {path})")]
    Read { message: String, path: String },

    #[error("syntax error: {message} (path: {path}, line: {line}, column: {column})")]
    Syntax {
        message: String,
        path: String,
        line: u32,
        column: u32,
    },

    #[error("grammar error: {message}")]
    Grammar { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("git error: {message}")]
    Git { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BundleError {
    /// Returns `true` for the failures a file can produce on its way through
    /// the parser: it could not be read, or it could not be parsed.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, BundleError::Read { .. } | BundleError::Syntax { .. })
    }
}

/// Convenience alias for results using `BundleError`.
pub type Result<T> = std::result::Result<T, BundleError>;
