//! Error types for the currency converter.

use std::io;
use std::path::PathBuf;

use crate::domain::CurrencyCode;

/// Domain-level errors (invalid values).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Currency code cannot be empty")]
    EmptyCurrencyCode,

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),
}

/// Failures resolving the API key.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Missing `{field}` in {origin}")]
    MissingField { field: String, origin: String },

    #[error("No API key source configured")]
    NoProvider,
}

/// Failures talking to the exchange-rate API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to get response from the API ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Parse(String),
}

/// Failures resolving a country name to a currency.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("No country found matching '{0}'")]
    NotFound(String),

    #[error("Unexpected country API response format")]
    UnexpectedShape,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors surfaced by the conversion service.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(#[from] ApiError),

    #[error("Invalid currency code: {0}")]
    UnknownCurrency(CurrencyCode),

    #[error("Country lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_includes_body() {
        let err = ConversionError::from(ApiError::Status {
            status: 403,
            body: r#"{"result":"error","error-type":"invalid-key"}"#.into(),
        });
        let message = err.to_string();
        assert!(message.starts_with("Network error"));
        assert!(message.contains("invalid-key"));
    }

    #[test]
    fn test_missing_field_message() {
        let err = ConfigError::MissingField {
            field: "api_key".into(),
            origin: "config.properties".into(),
        };
        assert_eq!(err.to_string(), "Missing `api_key` in config.properties");
    }
}
