//! Codec mode and error definitions.

use std::fmt;

use http_body_util::LengthLimitError;
use thiserror::Error;

/// Content type prefix that selects structured-mode decoding.
pub const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

/// Wire encoding an event arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Whole event is one JSON document.
    Structured,
    /// Attributes in `ce-*` headers, payload is the raw body.
    Binary,
}

impl Mode {
    /// Select the mode from a verbatim `Content-Type` value.
    ///
    /// Compares raw bytes, so values carrying non-ASCII parameters still match.
    pub fn from_content_type(content_type: impl AsRef<[u8]>) -> Self {
        if content_type
            .as_ref()
            .starts_with(STRUCTURED_CONTENT_TYPE.as_bytes())
        {
            Mode::Structured
        } else {
            Mode::Binary
        }
    }

    pub fn is_binary(self) -> bool {
        self == Mode::Binary
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Structured => f.write_str("structured"),
            Mode::Binary => f.write_str("binary"),
        }
    }
}

/// Errors that can occur while decoding or marshalling an event.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Reading the request body failed.
    #[error(transparent)]
    Body(#[from] axum::Error),

    /// Structured envelope is not valid JSON, or a payload failed to serialize.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// True when the body read stopped at the configured size limit.
    pub fn is_body_too_large(&self) -> bool {
        let CodecError::Body(err) = self else {
            return false;
        };
        let mut source = Some(err as &(dyn std::error::Error + 'static));
        while let Some(e) = source {
            if e.is::<LengthLimitError>() {
                return true;
            }
            source = e.source();
        }
        false
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
