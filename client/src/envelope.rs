//! Response envelope decoding and error mapping.
//!
//! # Design
//! Every GOFO response body is the same wrapper: `{code, msg, msgEn, data}`.
//! Success is decided by the envelope `code` alone — the HTTP status is
//! never consulted, since the provider returns usable envelopes on 4xx/5xx
//! transport statuses too. All fields are defaulted so partial envelopes
//! still decode; a missing `code` then classifies as an envelope error
//! rather than a silent success.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

/// Envelope status code meaning success.
pub const OK: i64 = 200;

/// Known provider status codes and their fixed meanings. A table rather
/// than branching logic so new provider codes land as rows.
const KNOWN_CODES: &[(i64, &str)] = &[
    (400, "Malformed request parameters"),
    (401, "Invalid or expired token"),
    (404, "Resource does not exist"),
    (500, "Internal server error, please contact GOFO support"),
];

/// The uniform wrapper every GOFO response conforms to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub code: i64,
    pub msg: String,
    #[serde(rename = "msgEn")]
    pub msg_en: String,
    pub data: Value,
}

/// Typed view of the `data` slot, decoded from the same body after the
/// envelope has been accepted.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// Decode `body` as an envelope and classify it: code 200 yields the
/// envelope, any other code yields [`Error::Api`] with the resolved
/// message, an undecodable body yields [`Error::Decode`].
pub(crate) fn unwrap_body(body: &str) -> Result<Envelope, Error> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.code == OK {
        return Ok(envelope);
    }
    Err(Error::Api {
        code: envelope.code,
        message: resolve_message(envelope.code, &envelope.msg),
    })
}

/// Fixed text for a known code; otherwise the envelope's own message
/// trimmed of surrounding whitespace, with a generic fallback when that
/// leaves nothing.
fn resolve_message(code: i64, msg: &str) -> String {
    if let Some((_, fixed)) = KNOWN_CODES.iter().find(|(known, _)| *known == code) {
        return (*fixed).to_string();
    }
    let trimmed = msg.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}
