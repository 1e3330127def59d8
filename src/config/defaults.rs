use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::ConnectionArgs;
use crate::http::GatewayConfig;

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787/v1";

/// Client settings, read from the `[client]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub node_url: String,
    pub wallet_url: String,
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_GATEWAY_URL.to_string(),
            wallet_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout_secs: None,
            user_agent: GatewayConfig::default().user_agent,
        }
    }
}

impl ClientConfig {
    /// Command line flags take precedence over file and environment values.
    pub fn apply_args(&mut self, args: &ConnectionArgs) {
        if let Some(node_url) = &args.node_url {
            self.node_url = node_url.clone();
        }
        if let Some(wallet_url) = &args.wallet_url {
            self.wallet_url = wallet_url.clone();
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.timeout_secs = Some(timeout_secs);
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_config() {
        let mut config = ClientConfig::default();
        let args = ConnectionArgs {
            node_url: Some("http://node:8787/v1".to_string()),
            wallet_url: None,
            timeout_secs: Some(5),
        };

        config.apply_args(&args);

        assert_eq!(config.node_url, "http://node:8787/v1");
        assert_eq!(config.wallet_url, DEFAULT_GATEWAY_URL);
        assert_eq!(config.gateway_config().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_default_has_no_timeout() {
        assert_eq!(ClientConfig::default().gateway_config().timeout, None);
    }
}
