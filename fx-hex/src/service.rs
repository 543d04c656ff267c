//! Conversion Application Service
//!
//! Orchestrates the key, rate and currency-code ports.
//! Contains NO infrastructure logic - pure orchestration.

use std::collections::BTreeSet;
use std::sync::Arc;

use fx_types::{
    ApiKeyProvider, Conversion, ConversionError, ConversionRequest, CountryLookup, CurrencyCode,
    CurrencyCodeSource, RateSource,
};
use tracing::{debug, instrument};

use crate::cache::CurrencyCache;

/// Application service for currency conversion.
///
/// Generic over the ports - adapters are injected at construction time.
/// Rates are fetched on every conversion; only the supported-code set is
/// cached.
pub struct ConversionService<K, R, C> {
    keys: K,
    rates: R,
    currencies: CurrencyCache<C>,
    countries: Option<Box<dyn CountryLookup>>,
}

impl<K, R, C> ConversionService<K, R, C>
where
    K: ApiKeyProvider,
    R: RateSource,
    C: CurrencyCodeSource,
{
    /// Creates a service without country-name lookup.
    pub fn new(keys: K, rates: R, currencies: CurrencyCache<C>) -> Self {
        Self {
            keys,
            rates,
            currencies,
            countries: None,
        }
    }

    /// Enables resolving country names in [`resolve_currency`](Self::resolve_currency).
    pub fn with_country_lookup(mut self, lookup: impl CountryLookup + 'static) -> Self {
        self.countries = Some(Box::new(lookup));
        self
    }

    pub fn has_country_lookup(&self) -> bool {
        self.countries.is_some()
    }

    /// Returns a reference to the underlying rate source.
    pub fn rate_source(&self) -> &R {
        &self.rates
    }

    /// Returns the currency-code cache.
    pub fn currency_cache(&self) -> &CurrencyCache<C> {
        &self.currencies
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `req.amount` from `req.from` to `req.to` at the latest rate.
    ///
    /// The result is unrounded; formatting is left to the caller.
    #[instrument(skip_all, fields(from = %req.from, to = %req.to))]
    pub async fn convert(&self, req: &ConversionRequest) -> Result<Conversion, ConversionError> {
        let key = self.keys.resolve()?;
        let table = self.rates.latest_rates(&key, &req.from).await?;

        let rate = table
            .rate(&req.to)
            .ok_or_else(|| ConversionError::UnknownCurrency(req.to.clone()))?;
        debug!(rate, "Applying rate");

        Ok(Conversion {
            request: req.clone(),
            converted: req.amount * rate,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Discovery
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists the codes the rate API supports, through the cache.
    pub async fn supported_currencies(
        &self,
    ) -> Result<Arc<BTreeSet<CurrencyCode>>, ConversionError> {
        let key = self.keys.resolve()?;
        Ok(self.currencies.get_all(&key).await?)
    }

    /// Turns user input into a supported currency code.
    ///
    /// Input that is already a supported code is returned as-is. Anything else
    /// is treated as a country name when a lookup is configured.
    #[instrument(skip(self))]
    pub async fn resolve_currency(&self, input: &str) -> Result<CurrencyCode, ConversionError> {
        let supported = self.supported_currencies().await?;

        let parsed = CurrencyCode::new(input);
        if let Ok(code) = &parsed {
            if supported.contains(code) {
                return Ok(code.clone());
            }
        }

        let code = match &self.countries {
            Some(lookup) => lookup.currency_for_country(input).await?,
            None => parsed?,
        };

        if supported.contains(&code) {
            debug!("Resolved '{}' to {}", input, code);
            Ok(code)
        } else {
            Err(ConversionError::UnknownCurrency(code))
        }
    }
}
