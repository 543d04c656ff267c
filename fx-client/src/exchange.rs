//! exchangerate-api v6 adapter.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use fx_types::{ApiError, ApiKey, CurrencyCode, CurrencyCodeSource, RateSource, RateTable};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{DEFAULT_RATE_API_URL, endpoint, parse_success, send};

#[derive(Deserialize)]
struct LatestResponse {
    conversion_rates: HashMap<CurrencyCode, f64>,
}

#[derive(Deserialize)]
struct CodesResponse {
    supported_codes: Vec<(CurrencyCode, String)>,
}

/// Client for the `latest` and `codes` endpoints.
#[derive(Clone)]
pub struct ExchangeRateClient {
    base_url: String,
    http: Client,
}

impl ExchangeRateClient {
    /// Creates a client against the public exchangerate-api endpoint.
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, DEFAULT_RATE_API_URL)
    }

    /// Creates a client against another deployment (or a test server).
    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Lists supported codes with their display names, in response order.
    #[instrument(skip(self, key))]
    pub async fn supported_currencies(
        &self,
        key: &ApiKey,
    ) -> Result<Vec<(CurrencyCode, String)>, ApiError> {
        let url = endpoint(&self.base_url, &[key.expose(), "codes"])?;
        let (status, body) = send(&self.http, url).await?;
        let codes: CodesResponse = parse_success(status, &body)?;
        debug!("API supports {} currencies", codes.supported_codes.len());
        Ok(codes.supported_codes)
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    #[instrument(skip(self, key))]
    async fn latest_rates(
        &self,
        key: &ApiKey,
        base: &CurrencyCode,
    ) -> Result<RateTable, ApiError> {
        let url = endpoint(&self.base_url, &[key.expose(), "latest", base.as_str()])?;
        let (status, body) = send(&self.http, url).await?;
        let latest: LatestResponse = parse_success(status, &body)?;
        debug!("Fetched {} rates", latest.conversion_rates.len());
        Ok(RateTable::new(base.clone(), latest.conversion_rates))
    }
}

#[async_trait]
impl CurrencyCodeSource for ExchangeRateClient {
    async fn supported_codes(&self, key: &ApiKey) -> Result<BTreeSet<CurrencyCode>, ApiError> {
        let currencies = self.supported_currencies(key).await?;
        Ok(currencies.into_iter().map(|(code, _name)| code).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn client(server: &mockito::Server) -> ExchangeRateClient {
        ExchangeRateClient::with_base_url(Client::new(), server.url())
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ExchangeRateClient::with_base_url(Client::new(), "http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_latest_rates() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/test-key/latest/EUR")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"result":"success","base_code":"EUR","conversion_rates":{"EUR":1,"USD":1.08,"MXN":18.7}}"#,
            )
            .create_async()
            .await;

        let table = client(&server)
            .latest_rates(&ApiKey::new("test-key"), &code("EUR"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(table.base(), &code("EUR"));
        assert_eq!(table.rate(&code("USD")), Some(1.08));
        assert_eq!(table.rate(&code("EUR")), Some(1.0));
        assert_eq!(table.len(), 3);
    }

    #[tokio::test]
    async fn test_latest_rates_error_status_carries_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/bad-key/latest/EUR")
            .with_status(403)
            .with_body(r#"{"result":"error","error-type":"invalid-key"}"#)
            .create_async()
            .await;

        let result = client(&server)
            .latest_rates(&ApiKey::new("bad-key"), &code("EUR"))
            .await;

        match result {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("invalid-key"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_latest_rates_missing_field_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/k/latest/EUR")
            .with_status(200)
            .with_body(r#"{"result":"success","base_code":"EUR"}"#)
            .create_async()
            .await;

        let result = client(&server)
            .latest_rates(&ApiKey::new("k"), &code("EUR"))
            .await;

        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_latest_rates_malformed_json_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/k/latest/EUR")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let result = client(&server)
            .latest_rates(&ApiKey::new("k"), &code("EUR"))
            .await;

        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_supported_codes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/k/codes")
            .with_status(200)
            .with_body(
                r#"{"result":"success","supported_codes":[["USD","US Dollar"],["EUR","Euro"]]}"#,
            )
            .create_async()
            .await;

        let codes = client(&server)
            .supported_codes(&ApiKey::new("k"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(codes, BTreeSet::from([code("USD"), code("EUR")]));
    }

    #[tokio::test]
    async fn test_supported_currencies_keep_names_in_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/k/codes")
            .with_status(200)
            .with_body(r#"{"supported_codes":[["USD","US Dollar"],["EUR","Euro"]]}"#)
            .create_async()
            .await;

        let currencies = client(&server)
            .supported_currencies(&ApiKey::new("k"))
            .await
            .unwrap();

        assert_eq!(
            currencies,
            vec![
                (code("USD"), "US Dollar".to_string()),
                (code("EUR"), "Euro".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_supported_codes_malformed_structure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/k/codes")
            .with_status(200)
            .with_body(r#"{"supported_codes":["USD","EUR"]}"#)
            .create_async()
            .await;

        let result = client(&server).supported_codes(&ApiKey::new("k")).await;

        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_supported_codes_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/k/codes")
            .with_status(500)
            .with_body("upstream down")
            .create_async()
            .await;

        let result = client(&server).supported_codes(&ApiKey::new("k")).await;

        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
    }
}
