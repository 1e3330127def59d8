//! HTTP client for the Fuego API gateway.
//!
//! # Architecture
//!
//! - [`RequestGateway`] - one HTTP exchange per call against a fixed
//!   endpoint root, returning decoded JSON
//! - [`NodeQueries`] - fixed-path chain queries (`/node/...`)
//! - [`WalletOperations`] - wallet reads and transfers (`/wallet/...`)
//! - [`HttpError`] - classified failures
//!
//! Responses are returned as [`serde_json::Value`]; the client imposes no
//! schema on them. Nothing is retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use fuego_api::http::{NodeQueries, RequestGateway, WalletOperations};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let gateway = RequestGateway::new("http://127.0.0.1:8787/v1/")?;
//! let node = NodeQueries::from_gateway(gateway.clone());
//! let wallet = WalletOperations::from_gateway(gateway);
//!
//! let header = node.get_block_header_by_height(12345).await?;
//! let balance = wallet.get_balance().await?;
//! println!("{} {}", header, balance);
//! # Ok(())
//! # }
//! ```

mod error;
mod gateway;
mod node;
mod types;
mod wallet;

pub use error::HttpError;
pub use gateway::{GatewayConfig, RequestGateway};
pub use node::NodeQueries;
pub use types::{Destination, JsonMap, ParseDestinationError, TransferRequest};
pub use wallet::WalletOperations;
