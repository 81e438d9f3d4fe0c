use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "sqlite://currency_info.db";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// JSON file with crypto currencies; the bundled list is used when unset
    #[serde(default)]
    pub crypto_fixture: Option<PathBuf>,
    /// JSON file with fiat currencies; the bundled list is used when unset
    #[serde(default)]
    pub fiat_fixture: Option<PathBuf>,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        // Try to read from config.toml first
        if let Ok(config) = load_config() {
            return config;
        }

        // Fallback to hardcoded defaults
        Self {
            database_url: default_database_url(),
            crypto_fixture: None,
            fiat_fixture: None,
        }
    }
}

fn get_config_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("config.toml");
    path
}

pub fn load_config() -> anyhow::Result<Config> {
    let config_path = get_config_path();
    let config_str = fs::read_to_string(config_path)?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
}

impl Config {
    /// `DATABASE_URL` from the environment (or `.env`) wins over the file
    pub fn with_env_overrides(self) -> Self {
        self.with_database_url(env::var("DATABASE_URL").ok())
    }

    /// Replace the database URL unless `url` is missing or blank
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            if !url.trim().is_empty() {
                self.database_url = url;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_defaults() -> anyhow::Result<()> {
        let config = parse_config("")?;
        assert_eq!(config.database_url, "sqlite://currency_info.db");
        assert!(config.crypto_fixture.is_none());
        assert!(config.fiat_fixture.is_none());
        Ok(())
    }

    #[test]
    fn test_parse_config_full() -> anyhow::Result<()> {
        let config = parse_config(
            r#"
            database_url = "sqlite::memory:"
            crypto_fixture = "data/crypto.json"
            fiat_fixture = "data/fiat.json"
            "#,
        )?;
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.crypto_fixture, Some(PathBuf::from("data/crypto.json")));
        assert_eq!(config.fiat_fixture, Some(PathBuf::from("data/fiat.json")));
        Ok(())
    }

    #[test]
    fn test_parse_config_rejects_bad_toml() {
        assert!(parse_config("database_url = ").is_err());
    }

    #[test]
    fn test_database_url_override() -> anyhow::Result<()> {
        let base = || parse_config(r#"database_url = "sqlite://from_file.db""#);

        assert_eq!(base()?.with_database_url(None).database_url, "sqlite://from_file.db");
        assert_eq!(
            base()?.with_database_url(Some("   ".to_string())).database_url,
            "sqlite://from_file.db"
        );
        assert_eq!(
            base()?
                .with_database_url(Some("sqlite::memory:".to_string()))
                .database_url,
            "sqlite::memory:"
        );
        Ok(())
    }

    #[test]
    fn test_env_overrides_read_database_url() -> anyhow::Result<()> {
        // The only test touching DATABASE_URL
        env::set_var("DATABASE_URL", "");
        let blank = parse_config(r#"database_url = "sqlite://from_file.db""#)?.with_env_overrides();
        assert_eq!(blank.database_url, "sqlite://from_file.db");

        env::set_var("DATABASE_URL", "sqlite://from_env.db");
        let set = parse_config(r#"database_url = "sqlite://from_file.db""#)?.with_env_overrides();
        assert_eq!(set.database_url, "sqlite://from_env.db");

        env::remove_var("DATABASE_URL");
        Ok(())
    }
}
