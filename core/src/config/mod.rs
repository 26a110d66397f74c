mod load;
mod types;

pub use load::{get_smith_data_dir, load_default, load_from};
pub use types::{
    normalize_provider_name, AgentConfig, AppConfig, LoggingConfig, PathsConfig, ProviderConfig,
    SystemConfig,
};
