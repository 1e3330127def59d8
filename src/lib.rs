//! Client library for the Fuego API gateway.
//!
//! The [`http`] module holds the transport ([`http::RequestGateway`]) and
//! the two facades built on it, [`http::NodeQueries`] and
//! [`http::WalletOperations`]. The remaining modules back the `fuego`
//! command line tool.

pub mod cli;
pub mod commands;
pub mod config;
pub mod http;
pub mod logging;

pub use crate::config::ClientConfig;
pub use crate::http::{HttpError, JsonMap, NodeQueries, RequestGateway, WalletOperations};
