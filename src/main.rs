use clap::Parser;
use log::error;

use fuego_api::cli::Cli;
use fuego_api::commands;
use fuego_api::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging()?;

    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        },
        Err(e) => {
            error!(error:% = format!("{:#}", e); "Command failed");
            Err(e)
        },
    }
}
