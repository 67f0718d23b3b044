//! Layered configuration: defaults, YAML file, `ERRKIT__*` environment, CLI

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use errkit::ErrorsConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment prefix; `ERRKIT__ERRORS__DOCS__URL` maps to `errors.docs.url`.
pub const ENV_PREFIX: &str = "ERRKIT__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file does not exist: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("configuration error: {0}")]
    Figment(#[source] Box<figment::Error>),

    #[error("invalid listen address '{addr}'")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8087,
        }
    }
}

impl ServerConfig {
    /// # Errors
    /// Returns `ConfigError::InvalidAddress` when `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub server: ServerConfig,
    pub errors: ErrorsConfig,
    pub logging: LoggingConfig,
}

/// Command-line values that override the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub docs_url: Option<String>,
    pub port: Option<u16>,
    /// -v info, -vv debug, -vvv trace
    pub verbose: u8,
}

impl DemoConfig {
    /// Provider chain without CLI overrides.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load defaults, then the YAML file at `path`, then the environment.
    ///
    /// # Errors
    /// `ConfigError::MissingFile` when `path` is given but is not a file,
    /// `ConfigError::Figment` when a layer cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path.filter(|p| !p.is_file()) {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Self::figment(path)
            .extract()
            .map_err(|e| ConfigError::Figment(Box::new(e)))
    }

    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(url) = &overrides.docs_url {
            self.errors.docs.url.clone_from(url);
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        let level = match overrides.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            level.clone_into(&mut self.logging.level);
        }
    }
}
