//! Wallet operations against the gateway's `/wallet` endpoints.
//!
//! This module provides [`WalletOperations`], the facade used to read the
//! wallet's balance and history and to submit transfers.
//!
//! # Example
//!
//! ```rust,no_run
//! use fuego_api::http::{Destination, TransferRequest, WalletOperations};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let wallet = WalletOperations::new("http://127.0.0.1:8787/v1")?;
//!
//! let balance = wallet.get_balance().await?;
//! println!("Balance: {}", balance);
//!
//! let request = TransferRequest::new(vec![Destination::new("fire1...", 1_000_000)]).with_mixin(2);
//! let result = wallet.send(&request).await?;
//! println!("Transfer result: {}", result);
//! # Ok(())
//! # }
//! ```

use log::{debug, info, warn};
use serde_json::Value;

use crate::logging::{mask_amount, mask_string};

use super::error::HttpError;
use super::gateway::{GatewayConfig, RequestGateway};
use super::types::{JsonMap, TransferRequest};

/// Wallet facade over a [`RequestGateway`].
///
/// Reads are `GET`s, everything that takes a body is a `POST`. Optional
/// bodies default to `{}`.
///
/// # Thread Safety
///
/// `WalletOperations` holds no mutable state and can be cloned into as many
/// async tasks as needed.
#[derive(Debug, Clone)]
pub struct WalletOperations {
    gateway: RequestGateway,
}

impl WalletOperations {
    /// Creates a wallet client for `base_url` with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidBaseUrl`] if `base_url` is empty or not
    /// an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Ok(Self::from_gateway(RequestGateway::new(base_url)?))
    }

    /// Creates a wallet client with custom transport settings.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::time::Duration;
    /// use fuego_api::http::{GatewayConfig, WalletOperations};
    ///
    /// let config = GatewayConfig {
    ///     timeout: Some(Duration::from_secs(120)),
    ///     ..GatewayConfig::default()
    /// };
    /// let wallet = WalletOperations::with_config("http://127.0.0.1:8787/v1", &config).unwrap();
    /// ```
    pub fn with_config(base_url: &str, config: &GatewayConfig) -> Result<Self, HttpError> {
        Ok(Self::from_gateway(RequestGateway::with_config(base_url, config)?))
    }

    pub fn from_gateway(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub fn get_address(&self) -> &str {
        self.gateway.base_url()
    }

    pub async fn get_balance(&self) -> Result<Value, HttpError> {
        debug!("HTTP: Requesting wallet balance");
        self.gateway.query("/wallet/balance").await
    }

    /// The wallet's synchronized height (`/wallet/height`).
    pub async fn get_height(&self) -> Result<Value, HttpError> {
        debug!("HTTP: Requesting wallet height");
        self.gateway.query("/wallet/height").await
    }

    /// Lists wallet transfers, optionally filtered.
    ///
    /// The filter is forwarded as-is; `None` sends `{}`.
    pub async fn get_transfers(&self, filter: Option<&JsonMap>) -> Result<Value, HttpError> {
        debug!(
            filtered = filter.is_some_and(|f| !f.is_empty());
            "HTTP: Requesting wallet transfers"
        );
        self.gateway.command("/wallet/transfers", filter).await
    }

    /// Submits a transfer. `request` is sent verbatim as the body.
    ///
    /// # Errors
    ///
    /// The gateway reports wallet-side rejections (insufficient funds, bad
    /// address, ...) as a non-2xx status, surfaced as
    /// [`HttpError::Remote`] with the gateway's error body.
    pub async fn transfer(&self, request: &JsonMap) -> Result<Value, HttpError> {
        info!(target: "audit", "HTTP: Submitting transfer");

        match self.gateway.command("/wallet/transfer", Some(request)).await {
            Ok(result) => {
                info!(target: "audit", "HTTP: Transfer submitted successfully");
                Ok(result)
            },
            Err(e) => {
                warn!(
                    target: "audit",
                    error:% = e;
                    "HTTP: Transfer submission failed"
                );
                Err(e)
            },
        }
    }

    /// Submits a typed transfer request.
    ///
    /// Unset optional fields are omitted from the body.
    pub async fn send(&self, request: &TransferRequest) -> Result<Value, HttpError> {
        for destination in &request.destinations {
            debug!(
                target: "audit",
                address = &*mask_string(&destination.address),
                amount = &*mask_amount(destination.amount);
                "HTTP: Transfer destination"
            );
        }

        let body = request.to_body()?;
        self.transfer(&body).await
    }

    /// Asks the wallet to consolidate its outputs (`/wallet/optimize`).
    pub async fn optimize(&self, request: Option<&JsonMap>) -> Result<Value, HttpError> {
        info!(target: "audit", "HTTP: Requesting wallet optimization");
        self.gateway.command("/wallet/optimize", request).await
    }
}
