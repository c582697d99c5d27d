use std::net::IpAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error_handling::types::ConfigError;

/// Runtime configuration for the fact store service.
///
/// Parsed either from command-line arguments (`Config::from_args`, when any
/// flags are given) or from a TOML file (`Config::from_file`). Every field
/// has a default, so an empty file and an empty command line both work.
///
/// # Fields Overview
///
/// - `bind_address`: For server binding
/// - `port`: Port on which to expose the HTTP API
/// - `database_path`: SQLite file backing the persistent store; when it
///   cannot be opened the service degrades to in-memory storage
/// - `allowed_origins`: Browser origins allowed to call the API with
///   credentials
#[derive(Parser, Debug, Clone, Deserialize)]
pub struct Config {
    /// Network address to bind the server to.
    ///
    /// # Command Line
    /// Use `--bind-address <ADDRESS>` to set this value from the CLI
    #[arg(long, default_value = "127.0.0.1")]
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number for the HTTP API.
    ///
    /// # Command Line
    /// Use `--port <PORT>` to set this value from the CLI
    #[arg(long, default_value_t = 3001)]
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database file, created when missing.
    ///
    /// # Command Line
    /// Use `--database-path <PATH>` to set this value from the CLI
    #[arg(long, default_value = "pawfacts.sqlite3")]
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Origins allowed to call the API from a browser, credentials included.
    ///
    /// Defaults to the Vite development origins. Not exposed as a
    /// command-line argument; set it in the configuration file.
    ///
    /// Currently uses `#[arg(skip)]` to exclude from command-line parsing
    #[arg(skip = default_origins())]
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_database_path() -> PathBuf {
    PathBuf::from("pawfacts.sqlite3")
}

fn default_origins() -> Vec<String> {
    // Vite's default ports
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            database_path: default_database_path(),
            allowed_origins: default_origins(),
        }
    }
}

impl Config {
    /// Creates a new `Config` from the command-line arguments.
    ///
    /// # Panics
    /// Panics (via clap) when the command line cannot be parsed, with a
    /// help message for the user.
    pub fn from_args() -> Result<Self, ConfigError> {
        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    /// Creates a new `Config` from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_address.parse::<IpAddr>().map_err(|_| {
            ConfigError::BadBindAddress(format!(
                "'{}' is not an IP address",
                self.bind_address
            ))
        })?;
        if self.port == 0 {
            return Err(ConfigError::BadPort("port must be non-zero".to_string()));
        }
        for origin in &self.allowed_origins {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::BadOrigin(format!(
                    "'{}' must start with http:// or https://",
                    origin
                )));
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn from_args_under_test() -> Result<Config, clap::Error> {
        Config::try_parse_from([
            "pawfacts",
            "--bind-address",
            "0.0.0.0",
            "--port",
            "8080",
            "--database-path",
            "/tmp/facts.sqlite3",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_args() {
        let config = Config::from_args_under_test().unwrap_or_else(|e| panic!("{}", e));

        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("/tmp/facts.sqlite3"));
        // arg(skip) field keeps its default
        assert_eq!(config.allowed_origins, default_origins());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bind_address = "0.0.0.0"
port = 4000
database_path = "facts/store.sqlite3"
allowed_origins = ["http://localhost:3000"]
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert_eq!(config.database_path, PathBuf::from("facts/store.sqlite3"));
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_from_file_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 4000").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.bind_address, default_bind_address());
        assert_eq!(config.allowed_origins, default_origins());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_address = Config {
            bind_address: "localhost".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            bad_address.validate(),
            Err(ConfigError::BadBindAddress(_))
        ));

        let bad_port = Config {
            port: 0,
            ..Config::default()
        };
        assert!(matches!(bad_port.validate(), Err(ConfigError::BadPort(_))));

        let bad_origin = Config {
            allowed_origins: vec!["localhost:5173".to_string()],
            ..Config::default()
        };
        assert!(matches!(
            bad_origin.validate(),
            Err(ConfigError::BadOrigin(_))
        ));
    }
}
