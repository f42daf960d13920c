//! Configuration Manager

use super::Config;
use crate::Result;
use anyhow::{bail, Context};

/// Builds the server configuration from command-line input
pub struct ConfigManager;

impl ConfigManager {
    /// Build a configuration listening on all interfaces at `port`.
    ///
    /// The port arrives as text and must be an integer in `0..=65535`.
    pub fn from_port_arg(port: &str) -> Result<Config> {
        let port = parse_port(port)?;

        let mut config = Config::default();
        config.server.bind_addr.set_port(port);

        config.validate()?;
        tracing::debug!("Configuration built for port {}", port);
        Ok(config)
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    let value: i64 = raw
        .parse()
        .with_context(|| format!("Invalid port {:?}: not an integer", raw))?;

    if !(0..=i64::from(u16::MAX)).contains(&value) {
        bail!("Invalid port {}: must be between 0 and 65535", value);
    }

    Ok(value as u16)
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_addr.ip().is_multicast() {
            bail!("bind address {} is a multicast address", self.server.bind_addr);
        }

        Ok(())
    }

    /// Render the effective configuration for the startup log
    pub fn summary(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to render configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        let config = ConfigManager::from_port_arg("10800").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:10800");
    }

    #[test]
    fn test_port_bounds() {
        assert_eq!(ConfigManager::from_port_arg("0").unwrap().server.bind_addr.port(), 0);
        assert_eq!(ConfigManager::from_port_arg("65535").unwrap().server.bind_addr.port(), 65535);

        assert!(ConfigManager::from_port_arg("65536").is_err());
        assert!(ConfigManager::from_port_arg("-1").is_err());
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        assert!(ConfigManager::from_port_arg("abc").is_err());
        assert!(ConfigManager::from_port_arg("").is_err());
        assert!(ConfigManager::from_port_arg("80.5").is_err());
        assert!(ConfigManager::from_port_arg(" 80").is_err());
    }

    #[test]
    fn test_summary_mentions_bind_addr() {
        let summary = Config::default().summary().unwrap();
        assert!(summary.contains("0.0.0.0:10800"));
    }
}
