use thiserror::Error;

/// Top-level error type used across the application.
#[derive(Debug, Error)]
pub enum ClustoryError {
    #[error("config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("export error: {0}")]
    Export(#[from] clustory_history::ExportError),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = ClustoryError> = std::result::Result<T, E>;

/// Why a single metrics request failed.
///
/// The `Display` text is what the dashboard shows inline for that resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, broken body stream.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("server returned {code} {reason}")]
    Status { code: u16, reason: String },

    /// The body was not JSON or lacked a required field.
    #[error("malformed response: {0}")]
    Malformed(String),
}
