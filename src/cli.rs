use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::http::{Destination, JsonMap};

#[derive(Parser, Debug)]
#[command(name = "fuego")]
#[command(about = "Fuego API gateway client", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Path to the configuration file",
        default_value = "data/fuego/config.toml",
        global = true
    )]
    pub config: PathBuf,
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Connection overrides applied on top of the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    #[arg(long, global = true, help = "Base URL for node queries (overrides config)")]
    pub node_url: Option<String>,
    #[arg(long, global = true, help = "Base URL for wallet operations (overrides config)")]
    pub wallet_url: Option<String>,
    #[arg(long, global = true, help = "Request timeout in seconds (overrides config)")]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Query chain state
    Node {
        #[command(subcommand)]
        node_subcommand: NodeCommand,
    },
    /// Wallet balance, history and transfers
    Wallet {
        #[command(subcommand)]
        wallet_subcommand: WalletCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum NodeCommand {
    /// Show node information
    Info,
    /// Show the current chain height
    Height,
    /// Show the block count
    BlockCount,
    /// Show the last block header
    LastBlockHeader,
    /// Show the header of the block at a given height
    BlockHeader {
        #[arg(long, help = "Block height")]
        height: u64,
    },
    /// Check that the gateway is reachable
    Health,
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Show wallet balance
    Balance,
    /// Show the wallet's synchronized height
    Height,
    /// List transfers
    Transfers {
        #[arg(short, long, value_parser = parse_json_object, help = "Filter as a JSON object")]
        filter: Option<JsonMap>,
    },
    /// Send funds
    Transfer {
        #[arg(
            short,
            long,
            required_unless_present = "request",
            help = "Destination as address::amount. Can be specified multiple times."
        )]
        destination: Vec<Destination>,
        #[arg(long, help = "Optional payment id")]
        payment_id: Option<String>,
        #[arg(long, help = "Optional mixin count")]
        mixin: Option<u64>,
        #[arg(long, help = "Optional unlock time")]
        unlock_time: Option<u64>,
        #[arg(long, help = "Optional time to live")]
        ttl: Option<u64>,
        #[arg(
            long,
            value_parser = parse_json_object,
            conflicts_with_all = ["destination", "payment_id", "mixin", "unlock_time", "ttl"],
            help = "Raw transfer request as a JSON object"
        )]
        request: Option<JsonMap>,
    },
    /// Consolidate wallet outputs
    Optimize {
        #[arg(long, value_parser = parse_json_object, help = "Optional request as a JSON object")]
        request: Option<JsonMap>,
    },
}

pub fn parse_json_object(s: &str) -> Result<JsonMap, String> {
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block_header() {
        let cli = Cli::try_parse_from(["fuego", "node", "block-header", "--height", "12345"]).unwrap();

        assert!(matches!(
            cli.command,
            Commands::Node {
                node_subcommand: NodeCommand::BlockHeader { height: 12345 }
            }
        ));
    }

    #[test]
    fn test_parse_global_connection_flags() {
        let cli = Cli::try_parse_from([
            "fuego",
            "wallet",
            "balance",
            "--wallet-url",
            "http://wallet:8787/v1",
            "--timeout-secs",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.connection.wallet_url.as_deref(), Some("http://wallet:8787/v1"));
        assert_eq!(cli.connection.timeout_secs, Some(3));
        assert!(cli.connection.node_url.is_none());
    }

    #[test]
    fn test_parse_transfer_destinations() {
        let cli = Cli::try_parse_from([
            "fuego",
            "wallet",
            "transfer",
            "-d",
            "fire1abc::5",
            "-d",
            "fire1def::7",
            "--mixin",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Wallet {
                wallet_subcommand: WalletCommand::Transfer { destination, mixin, .. },
            } => {
                assert_eq!(destination, vec![Destination::new("fire1abc", 5), Destination::new("fire1def", 7)]);
                assert_eq!(mixin, Some(2));
            },
            _ => panic!("expected wallet transfer"),
        }
    }

    #[test]
    fn test_transfer_requires_destination_or_request() {
        assert!(Cli::try_parse_from(["fuego", "wallet", "transfer"]).is_err());
        assert!(Cli::try_parse_from(["fuego", "wallet", "transfer", "--request", r#"{"to":"X","amount":5}"#]).is_ok());
        assert!(
            Cli::try_parse_from([
                "fuego",
                "wallet",
                "transfer",
                "-d",
                "fire1abc::5",
                "--request",
                "{}"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_json_arguments_must_be_objects() {
        assert!(parse_json_object(r#"{"a":1}"#).is_ok());
        assert!(parse_json_object("[1,2]").is_err());
        assert!(parse_json_object("{").is_err());
        assert!(Cli::try_parse_from(["fuego", "wallet", "optimize", "--request", "5"]).is_err());
    }
}
