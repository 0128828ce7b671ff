//! Configuration management for codebook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "codebook";

/// Default listen address.
pub const DEFAULT_ADDRESS: &str = ":8080";

/// Default seed file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data.txt";

/// Environment variable that overrides the listen address.
pub const PORT_ENV_VAR: &str = "APP_PORT";

/// Environment file read from the working directory at startup.
pub const ENV_FILE_NAME: &str = ".env";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. The `APP_PORT` environment variable (listen address only)
/// 2. Environment variables (prefixed with `CODEBOOK_`), including any
///    exported from a `.env` file by [`load_env_file`]
/// 3. TOML config file at `~/.config/codebook/config.toml`
/// 4. Default values
///
/// Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Seed data configuration.
    pub data: DataConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address. Accepts `host:port`, `:port` or a bare port.
    pub address: String,
}

/// Seed data configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the JSON seed file loaded at startup.
    pub path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `CODEBOOK_`)
    /// 4. `APP_PORT`, when set and non-empty
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("CODEBOOK_").split("_"));

        let config: Config = figment.extract()?;
        let config = config.with_port_override(std::env::var(PORT_ENV_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Apply the `APP_PORT` override. Empty values are ignored.
    #[must_use]
    pub fn with_port_override(mut self, port: Option<String>) -> Self {
        if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
            self.server.address = port;
        }
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.address.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "server.address must not be empty".to_string(),
            });
        }

        if self.data.path.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "data.path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the socket address to bind, resolving Go-style `:port` shorthands.
    #[must_use]
    pub fn listen_address(&self) -> String {
        normalize_address(&self.server.address)
    }
}

/// Export the variables in an environment file into the process environment.
///
/// Variables already set are left alone. A missing file is not an error; a
/// malformed one is logged and skipped. Returns whether the file was applied.
pub fn load_env_file(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded environment file");
            true
        }
        Err(e) if e.not_found() => {
            debug!(path = %path.display(), "No environment file");
            false
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load environment file");
            false
        }
    }
}

/// Turn `:8080` and `8080` into `0.0.0.0:8080`; leave anything else as is.
#[must_use]
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if let Some(port) = address.strip_prefix(':') {
        format!("0.0.0.0:{port}")
    } else if !address.is_empty() && address.bytes().all(|b| b.is_ascii_digit()) {
        format!("0.0.0.0:{address}")
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.address, ":8080");
        assert_eq!(config.data.path, PathBuf::from("data.txt"));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_address() {
        let mut config = Config::default();
        config.server.address = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("server.address"));
    }

    #[test]
    fn test_validate_empty_data_path() {
        let mut config = Config::default();
        config.data.path = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data.path"));
    }

    #[test]
    fn test_port_override_applies() {
        let config = Config::default().with_port_override(Some(":9090".to_string()));
        assert_eq!(config.server.address, ":9090");
    }

    #[test]
    fn test_port_override_ignores_empty_and_unset() {
        let config = Config::default().with_port_override(Some(String::new()));
        assert_eq!(config.server.address, DEFAULT_ADDRESS);

        let config = Config::default().with_port_override(None);
        assert_eq!(config.server.address, DEFAULT_ADDRESS);
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address(":8080"), "0.0.0.0:8080");
        assert_eq!(normalize_address("9000"), "0.0.0.0:9000");
        assert_eq!(normalize_address("127.0.0.1:3000"), "127.0.0.1:3000");
        assert_eq!(normalize_address("localhost:3000"), "localhost:3000");
    }

    #[test]
    fn test_listen_address_default() {
        assert_eq!(Config::default().listen_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("codebook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[server]\naddress = \"127.0.0.1:4000\"\n\n[data]\npath = \"/srv/seed.json\"\n",
            )?;
            jail.set_env(PORT_ENV_VAR, "");

            let config = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap();
            assert_eq!(config.server.address, "127.0.0.1:4000");
            assert_eq!(config.data.path, PathBuf::from("/srv/seed.json"));
            Ok(())
        });
    }

    #[test]
    fn test_load_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[server]\naddress = \"127.0.0.1:4000\"\n")?;
            jail.set_env("CODEBOOK_DATA_PATH", "/env/seed.json");
            jail.set_env(PORT_ENV_VAR, ":9000");

            let config = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap();
            assert_eq!(config.server.address, ":9000");
            assert_eq!(config.listen_address(), "0.0.0.0:9000");
            assert_eq!(config.data.path, PathBuf::from("/env/seed.json"));
            Ok(())
        });
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env(PORT_ENV_VAR, "");

            let config = Config::load_from(Some(PathBuf::from("absent.toml"))).unwrap();
            assert_eq!(config.data.path, PathBuf::from(DEFAULT_DATA_PATH));
            Ok(())
        });
    }

    #[test]
    fn test_load_env_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                ENV_FILE_NAME,
                "CODEBOOK_ENV_FILE_ADDED=file\nCODEBOOK_ENV_FILE_KEPT=file\n",
            )?;
            jail.set_env("CODEBOOK_ENV_FILE_KEPT", "shell");

            assert!(load_env_file(Path::new(ENV_FILE_NAME)));
            let added = std::env::var("CODEBOOK_ENV_FILE_ADDED");
            std::env::remove_var("CODEBOOK_ENV_FILE_ADDED");

            assert_eq!(added.as_deref(), Ok("file"));
            assert_eq!(std::env::var("CODEBOOK_ENV_FILE_KEPT").as_deref(), Ok("shell"));
            Ok(())
        });
    }

    #[test]
    fn test_load_env_file_missing_or_malformed() {
        Jail::expect_with(|jail| {
            assert!(!load_env_file(Path::new(ENV_FILE_NAME)));

            jail.create_file("broken.env", "NOT A VALID LINE\n")?;
            assert!(!load_env_file(Path::new("broken.env")));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("address"));
        assert!(json.contains("data.txt"));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"server": {"address": ":1234"}}"#).unwrap();
        assert_eq!(config.server.address, ":1234");
        assert_eq!(config.data, DataConfig::default());
    }
}
