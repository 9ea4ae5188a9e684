use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEFAULT_CONTROL_PLANE_REGION: &str = "us-east-1";
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Region the S3 Control client signs for and sends to.
    #[serde(default = "default_control_plane_region")]
    pub control_plane_region: String,
    /// Replaces the resolved S3 Control endpoint, e.g. for a local mock.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            control_plane_region: default_control_plane_region(),
            endpoint_url: None,
            address: default_address(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_control_plane_region() -> String {
    DEFAULT_CONTROL_PLANE_REGION.to_string()
}

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Loads relay configuration from environment variables or a TOML file.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from environment variables with fallback defaults
    pub fn load() -> Result<Config> {
        let control_plane_region = env::var("CONTROL_PLANE_REGION")
            .unwrap_or_else(|_| DEFAULT_CONTROL_PLANE_REGION.to_string());
        let endpoint_url = env::var("MRAP_RELAY_ENDPOINT_URL")
            .ok()
            .filter(|url| !url.is_empty());
        let address =
            env::var("MRAP_RELAY_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string());
        let port = env::var("MRAP_RELAY_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let log_level =
            env::var("MRAP_RELAY_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Config {
            control_plane_region,
            endpoint_url,
            address,
            port,
            log_level,
        })
    }

    /// Load configuration from a TOML file; missing keys take the defaults.
    pub async fn from_file(path: &Path) -> Result<Config> {
        let contents = String::from_utf8(tokio::fs::read(path).await?)?;
        Self::from_toml_str(&contents)
            .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))
    }

    pub fn from_toml_str(contents: &str) -> Result<Config> {
        Ok(toml::from_str(contents)?)
    }

    pub fn print_help() {
        println!("mrap-relay Configuration - Environment Variables");
        println!("================================================");
        println!();
        println!("Control plane:");
        println!("  CONTROL_PLANE_REGION       S3 Control region (default: us-east-1)");
        println!("  MRAP_RELAY_ENDPOINT_URL    Endpoint override (default: unset)");
        println!();
        println!("Serve mode:");
        println!("  MRAP_RELAY_ADDRESS         Bind address (default: 0.0.0.0)");
        println!("  MRAP_RELAY_PORT            Bind port (default: 8080)");
        println!();
        println!("Logging:");
        println!("  MRAP_RELAY_LOG_LEVEL       Log level (default: info)");
        println!();
        println!("Credentials are resolved by the AWS SDK default provider chain.");
        println!("The same keys may be given in a TOML file with --config <path>:");
        println!("  control_plane_region = \"eu-west-1\"");
        println!("  log_level = \"debug\"");
    }

    /// Validate loaded configuration
    pub fn validate(config: &Config) -> Result<()> {
        if config.control_plane_region.trim().is_empty() {
            return Err(anyhow!("Control plane region must not be empty"));
        }

        config
            .port
            .parse::<u16>()
            .map_err(|_| anyhow!("Invalid port number: {}", config.port))?;

        match config.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    config.log_level
                ))
            }
        }

        if let Some(url) = &config.endpoint_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow!(
                    "Invalid endpoint URL: {}. Must start with http:// or https://",
                    url
                ));
            }
        }

        Ok(())
    }
}
