//! Typed errors for the network edge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response; `body` is the (truncated) response text, which
    /// for the backend usually carries field-level validation messages.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The payload did not match the expected shape, or carried values
    /// that fail validation (e.g. an out-of-range coordinate).
    #[error("could not decode {context}: {message}")]
    Decode {
        context: &'static str,
        message: String,
    },

    #[error("could not read image file {path}: {source}")]
    Image {
        path: String,
        source: std::io::Error,
    },
}

impl ApiError {
    pub(crate) fn decode(context: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            context,
            message: message.into(),
        }
    }
}
