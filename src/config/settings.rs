use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::errors::SettingsError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

/// Which persistence adapter backs the entity stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    /// One JSON array file per collection under `DATA_DIR`
    Json,
    /// sea-orm tables in `DATABASE_URL`
    Database,
}

impl FromStr for StorageBackendKind {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "database" | "db" => Ok(Self::Database),
            _ => Err(SettingsError::invalid_format(
                "STORAGE_BACKEND",
                "json or database",
                value,
            )),
        }
    }
}

/// Process-wide settings, read once at start-up
#[derive(Clone)]
pub struct AppSettings {
    server_host: String,
    server_port: u16,
    storage_backend: StorageBackendKind,
    data_dir: PathBuf,
    database_url: String,
    upload_dir: PathBuf,
    max_upload_bytes: u64,
    monthly_hours_cap: Decimal,
    default_lecturer_rate: Decimal,
    default_approver_id: i32,
}

/// Reads one variable, falling back to a default when unset or blank
struct SettingReader<'a> {
    env: &'a dyn EnvironmentProvider,
}

impl SettingReader<'_> {
    fn raw(&self, key: &str, default: &str) -> String {
        self.env
            .get_var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, key: &str, default: &str, expected: &str) -> Result<T, SettingsError> {
        let value = self.raw(key, default);
        value
            .parse()
            .map_err(|_| SettingsError::invalid_format(key, expected, &value))
    }

    fn positive_decimal(&self, key: &str, default: &str) -> Result<Decimal, SettingsError> {
        let value: Decimal = self.parsed(key, default, "decimal number")?;
        if value <= Decimal::ZERO {
            return Err(SettingsError::invalid_setting(key, "must be greater than 0"));
        }
        Ok(value)
    }
}

impl AppSettings {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_DATA_DIR: &'static str = "Data";
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://cmcs.db?mode=rwc";
    pub const DEFAULT_UPLOAD_DIR: &'static str = "wwwroot";
    pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
    pub const DEFAULT_MONTHLY_HOURS_CAP: i64 = 180;
    pub const DEFAULT_LECTURER_RATE: i64 = 450;
    pub const DEFAULT_APPROVER_ID: i32 = 1;

    /// Load settings through the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SettingsError> {
        let reader = SettingReader {
            env: env_provider.as_ref(),
        };

        let server_host = reader.raw("HOST", Self::DEFAULT_HOST);

        let server_port: u16 = reader.parsed(
            "PORT",
            &Self::DEFAULT_PORT.to_string(),
            "port number between 1 and 65535",
        )?;
        if server_port == 0 {
            return Err(SettingsError::invalid_setting("PORT", "0 is outside valid range 1-65535"));
        }

        let storage_backend: StorageBackendKind = reader.raw("STORAGE_BACKEND", "json").parse()?;

        let max_upload_bytes: u64 = reader.parsed(
            "MAX_UPLOAD_BYTES",
            &Self::DEFAULT_MAX_UPLOAD_BYTES.to_string(),
            "number of bytes",
        )?;
        if max_upload_bytes == 0 {
            return Err(SettingsError::invalid_setting("MAX_UPLOAD_BYTES", "must be greater than 0"));
        }

        let default_approver_id: i32 = reader.parsed(
            "DEFAULT_APPROVER_ID",
            &Self::DEFAULT_APPROVER_ID.to_string(),
            "positive user id",
        )?;
        if default_approver_id <= 0 {
            return Err(SettingsError::invalid_setting("DEFAULT_APPROVER_ID", "must be a positive user id"));
        }

        Ok(Self {
            server_host,
            server_port,
            storage_backend,
            data_dir: PathBuf::from(reader.raw("DATA_DIR", Self::DEFAULT_DATA_DIR)),
            database_url: reader.raw("DATABASE_URL", Self::DEFAULT_DATABASE_URL),
            upload_dir: PathBuf::from(reader.raw("UPLOAD_DIR", Self::DEFAULT_UPLOAD_DIR)),
            max_upload_bytes,
            monthly_hours_cap: reader
                .positive_decimal("MONTHLY_HOURS_CAP", &Self::DEFAULT_MONTHLY_HOURS_CAP.to_string())?,
            default_lecturer_rate: reader
                .positive_decimal("DEFAULT_LECTURER_RATE", &Self::DEFAULT_LECTURER_RATE.to_string())?,
            default_approver_id,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn storage_backend(&self) -> StorageBackendKind {
        self.storage_backend
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub fn monthly_hours_cap(&self) -> Decimal {
        self.monthly_hours_cap
    }

    pub fn default_lecturer_rate(&self) -> Decimal {
        self.default_lecturer_rate
    }

    pub fn default_approver_id(&self) -> i32 {
        self.default_approver_id
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage_backend", &self.storage_backend)
            .field("data_dir", &self.data_dir)
            .field("upload_dir", &self.upload_dir)
            .field("monthly_hours_cap", &self.monthly_hours_cap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn load(vars: &[(&str, &str)]) -> Result<AppSettings, SettingsError> {
        AppSettings::from_env_provider(Arc::new(MockEnvironment::empty().with_vars(vars)))
    }

    #[test]
    fn test_defaults() {
        let settings = load(&[]).unwrap();

        assert_eq!(settings.server_address(), "0.0.0.0:3000");
        assert_eq!(settings.storage_backend(), StorageBackendKind::Json);
        assert_eq!(settings.data_dir(), Path::new("Data"));
        assert_eq!(settings.upload_dir(), Path::new("wwwroot"));
        assert_eq!(settings.max_upload_bytes(), 10_485_760);
        assert_eq!(settings.monthly_hours_cap(), Decimal::from(180));
        assert_eq!(settings.default_lecturer_rate(), Decimal::from(450));
        assert_eq!(settings.default_approver_id(), 1);
    }

    #[test]
    fn test_overrides() {
        let settings = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("STORAGE_BACKEND", "Database"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("MONTHLY_HOURS_CAP", "160.5"),
        ])
        .unwrap();

        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert_eq!(settings.storage_backend(), StorageBackendKind::Database);
        assert_eq!(settings.database_url(), "sqlite::memory:");
        assert_eq!(settings.monthly_hours_cap(), Decimal::new(1605, 1));
    }

    #[test]
    fn test_blank_value_uses_default() {
        let settings = load(&[("DATA_DIR", "   ")]).unwrap();
        assert_eq!(settings.data_dir(), Path::new("Data"));
    }

    #[test]
    fn test_invalid_port() {
        match load(&[("PORT", "not_a_number")]) {
            Err(SettingsError::InvalidFormat { setting_name, .. }) => assert_eq!(setting_name, "PORT"),
            other => panic!("Expected InvalidFormat for PORT, got: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_zero_port() {
        match load(&[("PORT", "0")]) {
            Err(SettingsError::InvalidSetting { setting_name, reason }) => {
                assert_eq!(setting_name, "PORT");
                assert!(reason.contains("outside valid range"));
            }
            other => panic!("Expected InvalidSetting for PORT, got: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unknown_backend() {
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "redis")]),
            Err(SettingsError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_non_positive_cap_rejected() {
        assert!(matches!(
            load(&[("MONTHLY_HOURS_CAP", "0")]),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }
}
