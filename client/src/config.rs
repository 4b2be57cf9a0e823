//! Client configuration: target environment, credentials, timeout.

use serde::Deserialize;

/// Production endpoint. The provider currently routes production accounts
/// through the UAT host as well.
pub const PROD_BASE_URL: &str = "https://uat-dbu-api.eminxing.com";

/// Test / UAT endpoint.
pub const TEST_BASE_URL: &str = "https://uat-dbu-api.eminxing.com";

/// Target environment, selecting the base URL for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    /// Live account, routed to [`PROD_BASE_URL`].
    Prod,
    /// Sandbox account, routed to [`TEST_BASE_URL`].
    #[default]
    Test,
}

impl Env {
    pub fn base_url(self) -> &'static str {
        match self {
            Env::Prod => PROD_BASE_URL,
            Env::Test => TEST_BASE_URL,
        }
    }
}

/// Immutable client configuration.
///
/// Constructed by the caller (typically deserialized from a config file)
/// and handed to [`Client::new`](crate::Client::new) once; never mutated
/// afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Environment to route requests to.
    #[serde(default)]
    pub env: Env,
    /// Basic-auth account name.
    pub account: String,
    /// Basic-auth secret.
    pub password: String,
    /// Per-request timeout in seconds. `0` disables the timeout.
    #[serde(default)]
    pub timeout: u64,
    /// When set, request and response bodies are included in debug logs.
    #[serde(default)]
    pub debug: bool,
}
