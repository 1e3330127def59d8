pub mod key_value_encoder;

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, anyhow};
use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::logging::key_value_encoder::KeyValueEncoderDeserializer;

const EXTERNAL_CONFIG_PATH: &str = "log4rs.yml";

/// Initializes logging from `./log4rs.yml`, or the embedded defaults when
/// that file does not exist.
pub fn init_logging() -> anyhow::Result<()> {
    let mut deserializers = Deserializers::default();
    deserializers.insert("key_value_console", KeyValueEncoderDeserializer);

    let path = Path::new(EXTERNAL_CONFIG_PATH);
    if path.exists() {
        log4rs::init_file(path, deserializers)
            .with_context(|| format!("Failed to load external {}", EXTERNAL_CONFIG_PATH))?;
        info!(
            path = EXTERNAL_CONFIG_PATH;
            "Logging initialized from external configuration"
        );
        return Ok(());
    }

    let yaml_content = include_str!("../../resources/default_log4rs.yml");
    let raw_config: RawConfig =
        serde_yaml::from_str(yaml_content).context("Embedded logging configuration is invalid YAML")?;

    let (appenders, errors) = raw_config.appenders_lossy(&deserializers);
    if !errors.is_empty() {
        return Err(anyhow!("Errors parsing embedded appenders: {:?}", errors));
    }

    let config = Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .context("Failed to build logging config")?;

    log4rs::init_config(config).context("Failed to initialize logging from embedded config")?;

    debug!("Logging initialized from embedded defaults (no external log4rs.yml found)");
    Ok(())
}

fn reveal_pii() -> bool {
    static REVEAL_PII_CACHE: OnceLock<bool> = OnceLock::new();

    *REVEAL_PII_CACHE.get_or_init(|| {
        std::env::var("FUEGO_REVEAL_PII")
            .map(|v| is_truthy(&v))
            .unwrap_or(false)
    })
}

fn is_truthy(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1"
}

/// Masks an address down to its first and last six characters unless
/// `FUEGO_REVEAL_PII` is set.
pub fn mask_string(s: &str) -> String {
    if reveal_pii() {
        return s.to_string();
    }
    mask(s)
}

/// Returns a placeholder for an amount unless `FUEGO_REVEAL_PII` is set.
pub fn mask_amount(amount: u64) -> String {
    if reveal_pii() {
        return amount.to_string();
    }
    "<REDACTED>".to_string()
}

fn mask(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_short_values_entirely() {
        assert_eq!(mask("fire1abc"), "***");
        assert_eq!(mask("123456789012"), "***");
    }

    #[test]
    fn test_mask_keeps_head_and_tail() {
        assert_eq!(
            mask("fire1qqqqqqqqqqqqqqqqqqqqqqqqqzzzzzz"),
            "fire1q...zzzzzz"
        );
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("true"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("1"));
        assert!(!is_truthy("yes"));
        assert!(!is_truthy("0"));
    }
}
