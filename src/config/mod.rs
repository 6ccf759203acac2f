// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod settings;

pub use loader::{config_dir, load_config, load_config_from};
pub use settings::{AnalysisConfig, Config, LoggingConfig, ProviderConfig, RefinementConfig, StorageConfig};
