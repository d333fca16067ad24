pub mod database;
mod env_provider;
pub mod errors;
mod logging;
mod settings;

#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::SettingsError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use settings::{AppSettings, StorageBackendKind};
