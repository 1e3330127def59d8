mod defaults;
mod loader;

pub use defaults::{ClientConfig, DEFAULT_GATEWAY_URL};
pub use loader::{get_default_config, load_configuration, write_config_to};
