use std::{collections::HashMap, env, fmt::Display, fs, io, path::Path, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_REDIS_URI, DEFAULT_SERVER_PORT, DEVELOPMENT_JWT_SECRET, LOCAL_CONFIG_PATH,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Unreadable local config file: {0}")]
    File(String),
}

/// The deployment a process runs in. Anything unrecognised counts as local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Sandbox,
    Production,
}

impl Environment {
    pub fn is_local(&self) -> bool {
        *self == Environment::Local
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "staging" => Self::Staging,
            "sandbox" => Self::Sandbox,
            "production" => Self::Production,
            _ => Self::Local,
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Environment::Local => "local",
            Environment::Staging => "staging",
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        })
    }
}

/// Settings from the local config file, keyed like the environment variables.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct LocalFile {
    values: HashMap<String, serde_json::Value>,
}

impl LocalFile {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|e| ConfigError::File(e.to_string()))
    }

    /// A missing file is an empty layer.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                log::info!("Loading local config from {}", path.display());
                Self::parse(&contents)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No local config at {}, using the environment only", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::File(format!("{}: {e}", path.display()))),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            serde_json::Value::String(value) => Some(value.clone()),
            serde_json::Value::Number(value) => Some(value.to_string()),
            serde_json::Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub redis_uri: String,
    pub redis_password: Option<String>,
    pub jwt_secret: String,
    pub server_port: u16,
}

impl Config {
    /// Reads the environment. Locally, `config/localConfig.json` fills in unset variables.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT")
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();

        let file = if environment.is_local() {
            LocalFile::read(Path::new(LOCAL_CONFIG_PATH))?
        } else {
            LocalFile::default()
        };

        Self::from_layers(|key| env::var(key).ok(), &file)
    }

    /// Looks each key up in `lookup` first and in `file` second.
    pub fn from_layers<F>(lookup: F, file: &LocalFile) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| file.get(key))
        })
    }

    /// Builds the config from any key lookup, `env::var` in production.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();
        log::info!("Current host environment: {environment}");

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let redis_uri = var("REDIS_URI").unwrap_or_else(|| {
            log::info!("REDIS_URI not set, using default: {DEFAULT_REDIS_URI}");
            DEFAULT_REDIS_URI.to_owned()
        });

        let jwt_secret = match var("JWT_SECRET_KEY") {
            Some(secret) => secret,
            None if environment.is_local() => {
                log::warn!("JWT_SECRET_KEY not set, using the development secret");
                DEVELOPMENT_JWT_SECRET.to_owned()
            }
            None => return Err(ConfigError::Missing("JWT_SECRET_KEY")),
        };

        let server_port = match var("SERVER_PORT") {
            Some(port) => parse("SERVER_PORT", &port)?,
            None => {
                log::info!("SERVER_PORT not set, using default: {DEFAULT_SERVER_PORT}");
                DEFAULT_SERVER_PORT
            }
        };

        Ok(Self {
            environment,
            database_url,
            redis_uri,
            redis_password: var("REDIS_PASSWORD"),
            jwt_secret,
            server_port,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
