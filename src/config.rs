//! TOML configuration.
//!
//! ```toml
//! [db]
//! path = "./data/beers.sqlite"
//!
//! [source]
//! root = "./data/beers"
//!
//! [server]
//! bind = "127.0.0.1:3000"
//! ```
//!
//! The `PORT` environment variable, when set, replaces the port of
//! `server.bind`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use beer_catalog_core::schema::is_valid_identifier;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "beers".to_string()
}

/// Directory of per-beer JSON documents.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct MigrationConfig {
    /// Maximum inserts in flight during a rebuild.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

fn default_concurrency() -> usize {
    8
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
    /// Hold off accepting requests until the startup rebuild has finished.
    #[serde(default = "default_wait_for_migration")]
    pub wait_for_migration: bool,
}

fn default_wait_for_migration() -> bool {
    true
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.db.table) {
            bail!(
                "db.table must be a plain identifier ([A-Za-z_][A-Za-z0-9_]*), got '{}'",
                self.db.table
            );
        }
        if self.migration.concurrency == 0 {
            bail!("migration.concurrency must be > 0");
        }
        if self.source.include_globs.is_empty() {
            bail!("source.include_globs must not be empty");
        }
        Ok(())
    }

    /// Replaces the port in `server.bind` with `port`.
    pub fn override_port(&mut self, port: &str) -> Result<()> {
        let port: u16 = port
            .trim()
            .parse()
            .with_context(|| format!("PORT is not a valid port number: '{}'", port))?;
        let host = match self.server.bind.rsplit_once(':') {
            Some((host, _)) => host,
            None => self.server.bind.as_str(),
        };
        self.server.bind = format!("{}:{}", host, port);
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if let Ok(port) = std::env::var("PORT") {
        config.override_port(&port)?;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[db]
path = "./data/beers.sqlite"

[source]
root = "./data/beers"

[server]
bind = "127.0.0.1:3000"
"#;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        config.validate().unwrap();
        assert_eq!(config.db.table, "beers");
        assert_eq!(config.source.include_globs, vec!["**/*.json".to_string()]);
        assert_eq!(config.migration.concurrency, 8);
        assert!(config.server.wait_for_migration);
    }

    #[test]
    fn test_rejects_unsafe_table_name() {
        let mut config: Config = toml::from_str(MINIMAL).unwrap();
        config.db.table = "beers; DROP TABLE beers".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config: Config = toml::from_str(MINIMAL).unwrap();
        config.migration.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_override_port() {
        let mut config: Config = toml::from_str(MINIMAL).unwrap();
        config.override_port("8080").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert!(config.override_port("not-a-port").is_err());
    }
}
