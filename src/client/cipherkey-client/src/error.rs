//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the encryption service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Key input could not be turned into a key.
    #[error("key error: {0}")]
    Key(#[from] cipherkey_core::KeyError),

    /// Transport or decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error status.
    #[error("service error ({status}): {message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Error message returned by the service.
        message: String,
    },

    /// No bearer token configured.
    #[error("missing authentication token")]
    MissingToken,
}
