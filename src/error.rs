//! Error types for the OpenCorporates client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The enum is closed: every failure the client can produce maps onto one of
//! the five kinds below, so callers can branch on the variant instead of
//! matching message text. Variants carry rendered messages and are `Clone`,
//! which lets an iterator that has reached a terminal failure re-serve the
//! exact same error on every subsequent call.

use thiserror::Error;

/// The main error type for the OpenCorporates client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A request was rejected before any network call was made
    #[error("invalid request: {message}")]
    Validation { message: String },

    /// The transport failed to complete the HTTP exchange
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Protocol { status: u16, message: String },

    /// The response body could not be decoded
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Normal end of iteration; a sentinel, not a failure
    #[error("no more items in iterator")]
    EndOfSequence,
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a protocol error from a status code and message
    pub fn protocol(status: u16, message: impl Into<String>) -> Self {
        Self::Protocol {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check whether this is the end-of-sequence sentinel
    pub fn is_end_of_sequence(&self) -> bool {
        matches!(self, Self::EndOfSequence)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Result type alias for the OpenCorporates client
pub type Result<T> = std::result::Result<T, Error>;
