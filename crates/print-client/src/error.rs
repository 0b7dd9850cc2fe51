//! Transport errors.

use std::io;
use std::time::Duration;

/// Why sending to a printer failed.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    /// Nothing is listening on the printer port.
    #[error("connection refused by {addr}")]
    ConnectionRefused {
        /// Address that refused.
        addr: String,
        /// OS error.
        #[source]
        source: io::Error,
    },

    /// The connect timeout elapsed.
    #[error("timed out connecting to {addr} after {timeout:?}")]
    ConnectionTimeout {
        /// Address being dialled.
        addr: String,
        /// Timeout that elapsed.
        timeout: Duration,
        /// OS error.
        #[source]
        source: io::Error,
    },

    /// Any other failure while opening or configuring the socket.
    #[error("could not connect to {addr}")]
    ConnectionFailed {
        /// Address being dialled.
        addr: String,
        /// OS error.
        #[source]
        source: io::Error,
    },

    /// The address text is empty or unusable.
    #[error("invalid printer address {0:?}")]
    InvalidAddress(String),

    /// Name resolution returned nothing.
    #[error("no address found for {0}")]
    NoAddressFound(String),

    /// Writing label data failed part way.
    #[error("write to printer failed: {0}")]
    WriteFailed(#[source] io::Error),

    /// Every attempt allowed by the retry policy failed.
    #[error("giving up after {attempts} attempts")]
    RetriesExhausted {
        /// Attempts made.
        attempts: u32,
        /// Error of the final attempt.
        #[source]
        last_error: Box<PrintError>,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PrintError {
    /// Whether trying the same operation again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PrintError::ConnectionTimeout { .. } | PrintError::WriteFailed(_)
        )
    }
}
