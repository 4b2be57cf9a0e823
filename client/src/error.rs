//! Error types for the GOFO API client.
//!
//! # Design
//! Each failure class gets its own variant so callers can branch on what
//! actually went wrong: bad input caught locally (`Validation`), a timed-out
//! or failed exchange (`Timeout` / `Transport`), a well-formed envelope with
//! a non-success business code (`Api`), an unparseable body (`Decode`), and
//! the one semantic failure a decoded response can still carry
//! (`EmptyLabel`). `Api` renders as `"<code>: <message>"`.

use thiserror::Error;

/// Errors returned by [`OrderService`](crate::order::OrderService)
/// operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request failed local validation before any network call was
    /// issued. The message lists every violated field, sorted by field
    /// name and joined with `"; "`.
    #[error("{0}")]
    Validation(String),

    /// The exchange timed out, either waiting to connect or waiting for
    /// the response.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// A transport-level failure other than a timeout. The underlying
    /// error is propagated unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] ureq::Error),

    /// The response body did not decode into the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider returned a well-formed envelope with a non-success
    /// status code. `message` is the resolved human-readable meaning of
    /// `code`.
    #[error("{code}: {message}")]
    Api { code: i64, message: String },

    /// The label endpoint answered successfully but with an empty
    /// base64 payload.
    #[error("label payload is empty")]
    EmptyLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_code_and_message() {
        let err = Error::Api {
            code: 401,
            message: "Invalid or expired token".to_string(),
        };
        assert_eq!(err.to_string(), "401: Invalid or expired token");
    }

    #[test]
    fn validation_error_displays_bare_message() {
        let err = Error::Validation("order number must not be empty".to_string());
        assert_eq!(err.to_string(), "order number must not be empty");
    }

    #[test]
    fn empty_label_has_fixed_text() {
        assert_eq!(Error::EmptyLabel.to_string(), "label payload is empty");
    }
}
