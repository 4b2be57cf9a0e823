//! Client construction and service wiring.

use crate::config::Config;
use crate::order::OrderService;
use crate::transport::Transport;

/// Entry point to the GOFO API.
///
/// Holds the configuration and the shared transport; all operations hang
/// off [`Client::order`]. Construction is the only time configuration is
/// read — the client never mutates it, so one instance can be shared
/// freely across threads.
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
    order: OrderService,
}

impl Client {
    /// Build a client routed to the endpoint selected by `config.env`.
    pub fn new(config: Config) -> Self {
        let base_url = config.env.base_url().to_string();
        Self::with_base_url(config, base_url)
    }

    /// Build a client against an explicit base URL instead of the fixed
    /// per-environment endpoint. Intended for staging hosts and the mock
    /// server in tests.
    pub fn with_base_url(config: Config, base_url: impl Into<String>) -> Self {
        let transport = Transport::new(&config, base_url);
        Self {
            order: OrderService::new(transport),
            config,
        }
    }

    /// Order operations: create, cancel, label, track.
    pub fn order(&self) -> &OrderService {
        &self.order
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Env;

    #[test]
    fn new_keeps_the_configuration() {
        let client = Client::new(Config {
            env: Env::Test,
            account: "acc".to_string(),
            password: "pw".to_string(),
            timeout: 30,
            debug: false,
        });
        assert_eq!(client.config().account, "acc");
        assert_eq!(client.config().env, Env::Test);
    }
}
