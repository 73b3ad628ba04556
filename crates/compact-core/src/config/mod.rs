pub mod resolve;
pub mod types;

pub use resolve::{resolve_config, resolve_config_in, ConfigSource, GLOBAL_CONFIG, LOCAL_CONFIG};
pub use types::CompactConfig;
