use anyhow::Context as _;
use marlin_client_core::{FileStorage, SessionStorage};
use marlin_shared::const_config::client::{
    pagination::PAGINATION_DEFAULT_LIMIT, CLIENT_DEFAULT_API_BASE_URL,
};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::{
    convert::{TryFrom, TryInto},
    path::{Path, PathBuf},
    sync::Arc,
};

/// Folder name used inside the platform config dir when no storage dir is set
pub const APP_FOLDER_NAME: &str = "marlin-admin";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub api: ApiSettings,
    #[serde(default)]
    pub session: SessionSettings,
    pub logs: LogsSettings,
    pub pagination: PaginationSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct SessionSettings {
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct LogsSettings {
    /// Serve the logs screens from generated data instead of the server
    pub use_mock: bool,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct PaginationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_limit: u32,
}

impl SessionSettings {
    pub fn storage(&self) -> anyhow::Result<Arc<dyn SessionStorage>> {
        let storage = match &self.storage_dir {
            Some(folder) => FileStorage::new(folder),
            None => FileStorage::in_config_dir(APP_FOLDER_NAME)?,
        };
        Ok(Arc::new(storage))
    }
}

pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("failed to parse APP_ENVIRONMENT")?;
    load_configuration(&configuration_directory, &environment)
}

/// Every file is optional, missing settings fall back to built in defaults
pub fn load_configuration(
    configuration_directory: &Path,
    environment: &Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .set_default("api.base_url", CLIENT_DEFAULT_API_BASE_URL)?
        .set_default("logs.use_mock", true)?
        .set_default("pagination.default_limit", i64::from(PAGINATION_DEFAULT_LIMIT))?
        .add_source(
            config::File::from(configuration_directory.join("base.toml")).required(false),
        )
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_API__BASE_URL=http://localhost:8080 would set `Settings.api.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("failed to build configuration")?;

    settings
        .try_deserialize::<Configuration>()
        .context("failed to deserialize configuration")
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
