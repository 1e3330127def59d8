use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, ConfigError, Environment};
use log::{debug, info};

use super::defaults::ClientConfig;

const ENV_PREFIX: &str = "FUEGO";
const CLIENT_SECTION: &str = "client";

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads the client configuration from `path`, layered with `FUEGO_*`
/// environment variables (`FUEGO_CLIENT__NODE_URL`, ...).
///
/// A default configuration file is written to `path` if none exists.
pub fn load_configuration(path: &Path) -> Result<ClientConfig> {
    build_configuration(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__")
}

fn build_configuration(path: &Path, environment: Environment) -> Result<ClientConfig> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    let cfg = Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(environment)
        .build()
        .context("Could not build config")?;

    match cfg.get::<ClientConfig>(CLIENT_SECTION) {
        Ok(client) => {
            debug!(node_url = &*client.node_url, wallet_url = &*client.wallet_url; "Loaded client configuration");
            Ok(client)
        },
        Err(ConfigError::NotFound(_)) => Ok(ClientConfig::default()),
        Err(e) => Err(e).context("Could not read client configuration"),
    }
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::DEFAULT_GATEWAY_URL;

    fn empty_environment() -> Environment {
        environment().source(Some(HashMap::new()))
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = build_configuration(&path, empty_environment()).unwrap();

        assert!(path.exists());
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.node_url, DEFAULT_GATEWAY_URL);
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(
            &path,
            "[client]\nnode_url = \"http://node:1234\"\nwallet_url = \"http://wallet:5678/\"\ntimeout_secs = 12\n",
        )
        .unwrap();

        let config = build_configuration(&path, empty_environment()).unwrap();

        assert_eq!(config.node_url, "http://node:1234");
        assert_eq!(config.wallet_url, "http://wallet:5678/");
        assert_eq!(config.timeout_secs, Some(12));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(&path, "[client]\nnode_url = \"http://node:1234\"\n").unwrap();

        let env = HashMap::from([("FUEGO_CLIENT__NODE_URL".to_string(), "http://other:1".to_string())]);
        let config = build_configuration(&path, environment().source(Some(env))).unwrap();

        assert_eq!(config.node_url, "http://other:1");
        assert_eq!(config.wallet_url, DEFAULT_GATEWAY_URL);
    }

    #[test]
    fn test_missing_client_section_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(&path, "# nothing here").unwrap();

        let config = build_configuration(&path, empty_environment()).unwrap();

        assert_eq!(config, ClientConfig::default());
    }
}
