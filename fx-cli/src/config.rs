//! Configuration loading from flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fx_client::{DEFAULT_COUNTRY_API_URL, DEFAULT_RATE_API_URL, HttpSettings};
use fx_hex::cache::DEFAULT_TTL;
use fx_hex::outbound::{ChainedKey, EnvKey, PropertiesFileKey, StaticKey};

/// Application configuration.
#[derive(Debug, Parser)]
#[command(name = "fx-convert")]
#[command(author, version, about = "Interactive currency converter", long_about = None)]
pub struct Config {
    /// Properties file holding `api_key`
    #[arg(long, env = "FX_CONFIG", default_value = "config.properties")]
    pub config: PathBuf,

    /// API key, checked before FX_API_KEY and the config file
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base URL of the exchange-rate API
    #[arg(long, env = "FX_API_URL", default_value = DEFAULT_RATE_API_URL)]
    pub api_url: String,

    /// Base URL of the country API
    #[arg(long, env = "FX_COUNTRY_API_URL", default_value = DEFAULT_COUNTRY_API_URL)]
    pub country_api_url: String,

    /// Only accept currency codes in the custom pair prompt
    #[arg(long)]
    pub no_country_lookup: bool,

    /// Seconds the supported-currency list stays cached
    #[arg(long, env = "FX_CACHE_TTL", default_value_t = DEFAULT_TTL.as_secs())]
    pub cache_ttl: u64,

    /// Connect and request timeout in seconds
    #[arg(long, env = "FX_HTTP_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,
}

impl Config {
    /// `--api-key`, then `FX_API_KEY`, then the properties file.
    pub fn key_provider(&self) -> ChainedKey {
        let mut chain = ChainedKey::new();
        if let Some(key) = &self.api_key {
            chain = chain.with(StaticKey::new(key.clone()));
        }
        chain
            .with(EnvKey::default())
            .with(PropertiesFileKey::new(&self.config))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn http_settings(&self) -> HttpSettings {
        let timeout = Duration::from_secs(self.timeout);
        HttpSettings {
            connect_timeout: timeout,
            request_timeout: timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_types::ApiKeyProvider;

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "fx-convert",
            "--api-key",
            "k",
            "--cache-ttl",
            "5",
            "--timeout",
            "10",
            "--no-country-lookup",
        ])
        .unwrap();

        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
        assert_eq!(config.http_settings().request_timeout, Duration::from_secs(10));
        assert!(config.no_country_lookup);
    }

    #[test]
    fn test_api_key_flag_wins() {
        let config = Config::try_parse_from(["fx-convert", "--api-key", "from-flag"]).unwrap();
        let chain = config.key_provider();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.resolve().unwrap().expose(), "from-flag");
    }

    #[test]
    fn test_without_flag_chain_ends_with_file() {
        let config = Config::try_parse_from([
            "fx-convert",
            "--config",
            "/nonexistent/fx/config.properties",
        ])
        .unwrap();
        assert_eq!(config.key_provider().len(), 2);
    }

    #[test]
    fn test_cache_ttl_defaults_to_cache_window() {
        if std::env::var_os("FX_CACHE_TTL").is_some() {
            return;
        }
        let config = Config::try_parse_from(["fx-convert"]).unwrap();
        assert_eq!(config.cache_ttl(), DEFAULT_TTL);
    }

    #[test]
    fn test_rejects_non_numeric_ttl() {
        let result = Config::try_parse_from(["fx-convert", "--cache-ttl", "soon"]);
        assert!(result.is_err());
    }
}
