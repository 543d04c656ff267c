//! restcountries v3.1 adapter.

use async_trait::async_trait;
use fx_types::{ApiError, CountryLookup, CurrencyCode, LookupError};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{DEFAULT_COUNTRY_API_URL, endpoint, send};

/// Resolves a country name to its currency.
#[derive(Clone)]
pub struct CountryClient {
    base_url: String,
    http: Client,
}

impl CountryClient {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, DEFAULT_COUNTRY_API_URL)
    }

    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[async_trait]
impl CountryLookup for CountryClient {
    #[instrument(skip(self))]
    async fn currency_for_country(&self, name: &str) -> Result<CurrencyCode, LookupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupError::NotFound(String::new()));
        }

        let url = endpoint(&self.base_url, &["name", name])?;
        let (status, body) = send(&self.http, url).await?;

        // The API answers 404 for names it does not know.
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let value: Value = serde_json::from_str(&body).map_err(|_| LookupError::UnexpectedShape)?;
        let code = first_currency(&value, name)?;
        debug!("Resolved {} to {}", name, code);
        Ok(code)
    }
}

/// First currency key of the first country record.
fn first_currency(value: &Value, name: &str) -> Result<CurrencyCode, LookupError> {
    let countries = value.as_array().ok_or(LookupError::UnexpectedShape)?;
    let country = countries
        .first()
        .ok_or_else(|| LookupError::NotFound(name.to_string()))?;

    country
        .get("currencies")
        .and_then(Value::as_object)
        .and_then(|currencies| currencies.keys().next())
        .and_then(|code| CurrencyCode::new(code).ok())
        .ok_or(LookupError::UnexpectedShape)
}
