//! API key providers.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use fx_types::{ApiKey, ApiKeyProvider, ConfigError};
use tracing::debug;

/// Field read from properties files unless overridden.
pub const DEFAULT_KEY_FIELD: &str = "api_key";

/// Environment variable read by [`EnvKey::default`].
pub const DEFAULT_KEY_ENV: &str = "FX_API_KEY";

/// Reads the key from a `.properties` file on every call.
#[derive(Debug, Clone)]
pub struct PropertiesFileKey {
    path: PathBuf,
    field: String,
}

impl PropertiesFileKey {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            field: DEFAULT_KEY_FIELD.to_string(),
        }
    }

    /// Reads `field` instead of `api_key`.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

impl ApiKeyProvider for PropertiesFileKey {
    fn resolve(&self) -> Result<ApiKey, ConfigError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::Unreadable {
            path: self.path.clone(),
            source,
        })?;

        parse_properties(&contents)
            .remove(&self.field)
            .and_then(non_blank)
            .ok_or_else(|| ConfigError::MissingField {
                field: self.field.clone(),
                origin: self.path.display().to_string(),
            })
    }
}

fn non_blank(value: String) -> Option<ApiKey> {
    let value = value.trim();
    (!value.is_empty()).then(|| ApiKey::new(value))
}

/// Parses `key=value`, `key: value` and `key value` lines.
///
/// Blank lines and lines starting with `#` or `!` are skipped. A repeated key
/// keeps its last value.
pub fn parse_properties(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(['#', '!']))
        .map(|line| {
            let (key, value) = split_property(line);
            (key.to_string(), value.to_string())
        })
        .collect()
}

fn split_property(line: &str) -> (&str, &str) {
    match line.find(|c: char| c == '=' || c == ':' || c.is_whitespace()) {
        Some(idx) => {
            let mut value = line[idx..].trim_start();
            if let Some(rest) = value.strip_prefix(['=', ':']) {
                value = rest.trim_start();
            }
            (&line[..idx], value.trim_end())
        }
        None => (line, ""),
    }
}

/// Reads the key from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvKey {
    var: String,
}

impl EnvKey {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvKey {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_ENV)
    }
}

impl ApiKeyProvider for EnvKey {
    fn resolve(&self) -> Result<ApiKey, ConfigError> {
        env::var(&self.var)
            .ok()
            .and_then(non_blank)
            .ok_or_else(|| ConfigError::MissingField {
                field: self.var.clone(),
                origin: "environment".to_string(),
            })
    }
}

/// A literal key, e.g. passed on the command line.
#[derive(Debug, Clone)]
pub struct StaticKey(ApiKey);

impl StaticKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(ApiKey::new(key))
    }
}

impl ApiKeyProvider for StaticKey {
    fn resolve(&self) -> Result<ApiKey, ConfigError> {
        Ok(self.0.clone())
    }
}

/// Tries each provider in order and returns the first key found.
///
/// When every provider fails the last error is returned.
#[derive(Default)]
pub struct ChainedKey {
    providers: Vec<Box<dyn ApiKeyProvider>>,
}

impl ChainedKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl ApiKeyProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ApiKeyProvider for ChainedKey {
    fn resolve(&self) -> Result<ApiKey, ConfigError> {
        let mut last = ConfigError::NoProvider;
        for provider in &self.providers {
            match provider.resolve() {
                Ok(key) => return Ok(key),
                Err(err) => {
                    debug!("API key provider skipped: {}", err);
                    last = err;
                }
            }
        }
        Err(last)
    }
}
