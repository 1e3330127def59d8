//! Dispatches parsed CLI commands to the node and wallet facades.

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;

use crate::cli::{Cli, Commands, NodeCommand, WalletCommand};
use crate::config::{ClientConfig, load_configuration};
use crate::http::{NodeQueries, TransferRequest, WalletOperations};

/// Loads the configuration named by `cli`, applies the command line
/// overrides and runs the command.
pub async fn run(cli: Cli) -> Result<Value> {
    let mut config = load_configuration(&cli.config)
        .with_context(|| format!("Could not load configuration from {}", cli.config.display()))?;
    config.apply_args(&cli.connection);
    execute(&config, cli.command).await
}

pub async fn execute(config: &ClientConfig, command: Commands) -> Result<Value> {
    let gateway_config = config.gateway_config();

    match command {
        Commands::Node { node_subcommand } => {
            let node = NodeQueries::with_config(&config.node_url, &gateway_config)
                .with_context(|| format!("Invalid node URL {:?}", config.node_url))?;
            debug!(address = node.get_address(); "Running node command");
            run_node(&node, node_subcommand).await
        },
        Commands::Wallet { wallet_subcommand } => {
            let wallet = WalletOperations::with_config(&config.wallet_url, &gateway_config)
                .with_context(|| format!("Invalid wallet URL {:?}", config.wallet_url))?;
            debug!(address = wallet.get_address(); "Running wallet command");
            run_wallet(&wallet, wallet_subcommand).await
        },
    }
}

async fn run_node(node: &NodeQueries, command: NodeCommand) -> Result<Value> {
    let value = match command {
        NodeCommand::Info => node.get_info().await,
        NodeCommand::Height => node.get_height().await,
        NodeCommand::BlockCount => node.get_block_count().await,
        NodeCommand::LastBlockHeader => node.get_last_block_header().await,
        NodeCommand::BlockHeader { height } => node.get_block_header_by_height(height).await,
        NodeCommand::Health => node.health().await,
    }
    .context("Node request failed")?;
    Ok(value)
}

async fn run_wallet(wallet: &WalletOperations, command: WalletCommand) -> Result<Value> {
    let value = match command {
        WalletCommand::Balance => wallet.get_balance().await,
        WalletCommand::Height => wallet.get_height().await,
        WalletCommand::Transfers { filter } => wallet.get_transfers(filter.as_ref()).await,
        WalletCommand::Transfer {
            request: Some(request), ..
        } => wallet.transfer(&request).await,
        WalletCommand::Transfer {
            destination,
            payment_id,
            mixin,
            unlock_time,
            ttl,
            request: None,
        } => {
            let request = TransferRequest {
                payment_id,
                mixin,
                unlock_time,
                ttl,
                ..TransferRequest::new(destination)
            };
            wallet.send(&request).await
        },
        WalletCommand::Optimize { request } => wallet.optimize(request.as_ref()).await,
    }
    .context("Wallet request failed")?;
    Ok(value)
}
