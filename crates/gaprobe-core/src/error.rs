//! Error types for gaprobe.
//!
//! An empty query result is not an error; it is a `Report` with no rows.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unreadable key file, bad config file, unresolved view id.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key material was malformed or the authorization exchange was rejected.
    #[error("Credential error: {0}")]
    Credential(String),

    /// Network or TLS failure, or the HTTP client could not be built.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service rejected the query or answered with something unusable.
    #[error("Query error ({status}): {message}")]
    Query { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Query error for a response that arrived with a success status but
    /// could not be interpreted.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::Query {
            status: 200,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
