use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::infrastructure::observability::DEFAULT_LOG_FILTER;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub dashboard: DashboardSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub root: String,
    pub write_chunk_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{environment}.toml` (optional) and
    /// `APP__SECTION__KEY` environment variables, in that order.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), environment)
    }

    /// Same as [`Settings::load`], reading `appsettings.*` from `config_dir`.
    pub fn load_from(config_dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        Self::build(config_dir, environment, None)
    }

    fn build(
        config_dir: &Path,
        environment: Environment,
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings_file = config_dir.join(format!(
            "appsettings.{}.toml",
            environment.as_str().to_lowercase()
        ));

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.max_upload_bytes", 100 * 1024 * 1024)?
            .set_default("storage.root", "./uploads")?
            .set_default("storage.write_chunk_bytes", 64 * 1024)?
            .set_default("dashboard.url", "http://localhost:5000/api/dashboard")?
            .set_default("dashboard.timeout_secs", 10)?
            .set_default("logging.level", DEFAULT_LOG_FILTER)?
            .set_default("logging.enable_json", false)?
            .add_source(File::from(settings_file.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env_vars),
            )
            .build()?
            .try_deserialize()
    }
}
