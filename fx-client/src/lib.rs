//! # FX Client
//!
//! Typed HTTP adapters for the rate ports:
//! - [`ExchangeRateClient`] - latest rates and supported codes (exchangerate-api v6)
//! - [`CountryClient`] - country name to currency (restcountries v3.1)
//!
//! Both share one [`reqwest::Client`] built by [`build_http_client`].

mod country;
mod exchange;

use std::time::Duration;

use fx_types::ApiError;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

pub use country::CountryClient;
pub use exchange::ExchangeRateClient;

pub const DEFAULT_RATE_API_URL: &str = "https://v6.exchangerate-api.com/v6";
pub const DEFAULT_COUNTRY_API_URL: &str = "https://restcountries.com/v3.1";

/// Timeouts applied to every outbound request.
#[derive(Debug, Clone, Copy)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds the HTTP client shared by all adapters.
pub fn build_http_client(settings: &HttpSettings) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(transport_error)
}

fn transport_error(err: reqwest::Error) -> ApiError {
    // The request URL carries the API key.
    ApiError::Transport(err.without_url().to_string())
}

/// Appends path segments to `base_url`, percent-encoding each one.
fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ApiError::Transport(format!("Invalid base URL {}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::Transport(format!("Invalid base URL {}", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Sends a GET and returns the status with the full body text.
async fn send(http: &Client, url: Url) -> Result<(StatusCode, String), ApiError> {
    let resp = http.get(url).send().await.map_err(transport_error)?;
    let status = resp.status();
    let body = resp.text().await.map_err(transport_error)?;
    Ok((status, body))
}

/// Fails with the body as diagnostic text on non-success, otherwise parses JSON.
fn parse_success<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_segments() {
        let url = endpoint(DEFAULT_RATE_API_URL, &["key", "latest", "EUR"]).unwrap();
        assert_eq!(url.as_str(), "https://v6.exchangerate-api.com/v6/key/latest/EUR");
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let url = endpoint("http://localhost:3000/", &["key", "codes"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/key/codes");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint(DEFAULT_COUNTRY_API_URL, &["name", "united states"]).unwrap();
        assert_eq!(url.as_str(), "https://restcountries.com/v3.1/name/united%20states");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = endpoint("not a url", &["codes"]);
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[test]
    fn test_parse_success_keeps_error_body() {
        let result = parse_success::<serde_json::Value>(StatusCode::FORBIDDEN, "invalid-key");
        match result {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "invalid-key");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&HttpSettings::default()).is_ok());
    }
}
