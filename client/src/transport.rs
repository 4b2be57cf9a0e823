//! HTTP transport: one configured agent shared by every operation.
//!
//! # Design
//! The agent is built once from [`Config`] and never mutated: base URL,
//! basic-auth header, global per-request timeout, identifying user-agent.
//! `http_status_as_error` is disabled so 4xx/5xx responses come back as
//! data — status interpretation belongs to the envelope layer, not here.
//! Transport-level failures are retried up to [`RETRY_COUNT`] times with a
//! doubling wait clamped to [`RETRY_MAX_WAIT`]; the policy does not
//! distinguish idempotent from non-idempotent calls.

use std::fmt;
use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::config::Config;
use crate::error::Error;

const USER_AGENT: &str = concat!(
    "GOFO API Client-Rust/",
    env!("CARGO_PKG_VERSION")
);

const RETRY_COUNT: u32 = 2;
const RETRY_WAIT: Duration = Duration::from_secs(2);
const RETRY_MAX_WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Shared, immutable HTTP transport. Cloning shares the underlying agent.
#[derive(Clone)]
pub(crate) struct Transport {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
    debug: bool,
}

// Credentials stay out of debug output.
impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(config: &Config, base_url: impl Into<String>) -> Self {
        let timeout = (config.timeout > 0).then(|| Duration::from_secs(config.timeout));
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .user_agent(USER_AGENT)
            .build()
            .new_agent();
        let credentials = STANDARD.encode(format!("{}:{}", config.account, config.password));
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            authorization: format!("Basic {credentials}"),
            debug: config.debug,
        }
    }

    /// GET `path` with the given query parameters, returning the raw body
    /// text whatever the HTTP status was.
    pub(crate) fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, Error> {
        self.send(Method::Get, path, query, None)
    }

    /// POST `body` as JSON to `path`, returning the raw body text.
    pub(crate) fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<String, Error> {
        let body = serde_json::to_string(body)?;
        self.send(Method::Post, path, &[], Some(body))
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<String, Error> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0u32;
        loop {
            match self.send_once(method, &url, query, body.as_deref()) {
                Ok(text) => return Ok(text),
                Err(err) if attempt < RETRY_COUNT => {
                    let wait = retry_wait(attempt);
                    tracing::debug!(
                        method = method.as_str(),
                        %url,
                        attempt,
                        wait_secs = wait.as_secs(),
                        error = %err,
                        "transport failure, retrying"
                    );
                    thread::sleep(wait);
                    attempt += 1;
                }
                Err(err) => return Err(classify(err)),
            }
        }
    }

    fn send_once(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&str>,
    ) -> Result<String, ureq::Error> {
        tracing::debug!(method = method.as_str(), %url, "sending request");
        if self.debug {
            if let Some(body) = body {
                tracing::debug!(%body, "request body");
            }
        }

        let mut response = match method {
            Method::Get => {
                let mut request = self
                    .agent
                    .get(url)
                    .header("accept", "application/json")
                    .header("authorization", self.authorization.as_str());
                for (name, value) in query {
                    request = request.query(*name, *value);
                }
                request.call()?
            }
            Method::Post => self
                .agent
                .post(url)
                .header("accept", "application/json")
                .header("authorization", self.authorization.as_str())
                .content_type("application/json")
                .send(body.unwrap_or_default().as_bytes())?,
        };

        let status = response.status().as_u16();
        let text = response.body_mut().read_to_string()?;
        tracing::debug!(status, "received response");
        if self.debug {
            tracing::debug!(body = %text, "response body");
        }
        Ok(text)
    }
}

/// Doubling backoff within the configured window: 2s, 4s, then capped.
fn retry_wait(attempt: u32) -> Duration {
    (RETRY_WAIT * 2u32.saturating_pow(attempt)).min(RETRY_MAX_WAIT)
}

/// Split transport failures into the timeout class and everything else.
fn classify(err: ureq::Error) -> Error {
    let timed_out = matches!(&err, ureq::Error::Timeout(_))
        || matches!(&err, ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut);
    if timed_out {
        Error::Timeout(err.to_string())
    } else {
        Error::Transport(err)
    }
}
