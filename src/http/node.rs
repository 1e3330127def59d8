//! Read-only chain queries against the gateway's `/node` endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use fuego_api::http::NodeQueries;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let node = NodeQueries::new("http://127.0.0.1:8787/v1")?;
//!
//! if node.is_online().await {
//!     let height = node.get_height().await?;
//!     println!("Node height: {}", height);
//! }
//! # Ok(())
//! # }
//! ```

use log::{debug, warn};
use serde_json::Value;

use super::error::HttpError;
use super::gateway::{GatewayConfig, RequestGateway};

/// Fixed-path node queries. Every method is a single `GET`.
#[derive(Debug, Clone)]
pub struct NodeQueries {
    gateway: RequestGateway,
}

impl NodeQueries {
    /// Creates a node client for `base_url` with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidBaseUrl`] if `base_url` is empty or not
    /// an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Ok(Self::from_gateway(RequestGateway::new(base_url)?))
    }

    pub fn with_config(base_url: &str, config: &GatewayConfig) -> Result<Self, HttpError> {
        Ok(Self::from_gateway(RequestGateway::with_config(base_url, config)?))
    }

    pub fn from_gateway(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// Returns the gateway address, useful for logging.
    pub fn get_address(&self) -> &str {
        self.gateway.base_url()
    }

    /// Gateway liveness probe (`/health`).
    pub async fn health(&self) -> Result<Value, HttpError> {
        debug!("HTTP: Requesting gateway health");
        self.gateway.query("/health").await
    }

    /// Returns `true` if the health probe succeeds.
    ///
    /// Any failure, including a non-2xx status, is reported as offline.
    pub async fn is_online(&self) -> bool {
        match self.health().await {
            Ok(_) => {
                debug!("Gateway is online");
                true
            },
            Err(e) => {
                warn!(
                    error:% = e,
                    address = self.get_address();
                    "Gateway is offline"
                );
                false
            },
        }
    }

    /// General daemon information (`/node/info`).
    pub async fn get_info(&self) -> Result<Value, HttpError> {
        debug!("HTTP: Requesting node info");
        self.gateway.query("/node/info").await
    }

    pub async fn get_height(&self) -> Result<Value, HttpError> {
        debug!("HTTP: Requesting node height");
        self.gateway.query("/node/height").await
    }

    pub async fn get_block_count(&self) -> Result<Value, HttpError> {
        debug!("HTTP: Requesting block count");
        self.gateway.query("/node/blockcount").await
    }

    pub async fn get_last_block_header(&self) -> Result<Value, HttpError> {
        debug!("HTTP: Requesting last block header");
        self.gateway.query("/node/last_block_header").await
    }

    /// Header of the block at `height`.
    ///
    /// The height is rendered as a plain decimal path segment.
    pub async fn get_block_header_by_height(&self, height: u64) -> Result<Value, HttpError> {
        debug!(height = height; "HTTP: Requesting block header by height");
        let path = format!("/node/block_header_by_height/{}", height);
        self.gateway.query(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_get(server: &MockServer, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fixed_path_queries() {
        let mock_server = MockServer::start().await;
        mount_get(&mock_server, "/node/info", json!({"status": "OK", "height": 10})).await;
        mount_get(&mock_server, "/node/height", json!({"height": 10})).await;
        mount_get(&mock_server, "/node/blockcount", json!({"count": 11})).await;
        mount_get(&mock_server, "/node/last_block_header", json!({"block_header": {"height": 10}})).await;

        let node = NodeQueries::new(&mock_server.uri()).unwrap();

        assert_eq!(node.get_info().await.unwrap()["status"], "OK");
        assert_eq!(node.get_height().await.unwrap(), json!({"height": 10}));
        assert_eq!(node.get_block_count().await.unwrap(), json!({"count": 11}));
        assert_eq!(
            node.get_last_block_header().await.unwrap()["block_header"]["height"],
            10
        );
    }

    #[tokio::test]
    async fn test_block_header_by_height_path() {
        let mock_server = MockServer::start().await;
        mount_get(
            &mock_server,
            "/node/block_header_by_height/12345",
            json!({"block_header": {"height": 12345}}),
        )
        .await;

        let node = NodeQueries::new(&mock_server.uri()).unwrap();
        let header = node.get_block_header_by_height(12345).await.unwrap();
        assert_eq!(header["block_header"]["height"], 12345);

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method.as_str(), "GET");
        assert_eq!(requests[0].url.path(), "/node/block_header_by_height/12345");
        assert_eq!(requests[0].url.query(), None);
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_is_online() {
        let mock_server = MockServer::start().await;
        mount_get(&mock_server, "/health", json!({"ok": true})).await;

        let node = NodeQueries::new(&mock_server.uri()).unwrap();
        assert!(node.is_online().await);
    }

    #[tokio::test]
    async fn test_is_offline_on_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&mock_server)
            .await;

        let node = NodeQueries::new(&mock_server.uri()).unwrap();
        assert!(!node.is_online().await);
    }
}
