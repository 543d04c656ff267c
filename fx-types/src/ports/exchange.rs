//! Exchange rate provider ports.
//!
//! Implementations can be HTTP clients, mock providers, etc.

use std::collections::BTreeSet;

use crate::domain::{ApiKey, CurrencyCode, RateTable};
use crate::error::ApiError;

/// Source of the latest rates for a base currency.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the rate table for `base`. Never cached.
    async fn latest_rates(
        &self,
        key: &ApiKey,
        base: &CurrencyCode,
    ) -> Result<RateTable, ApiError>;
}

/// Source of the set of currency codes the rate API supports.
#[async_trait::async_trait]
pub trait CurrencyCodeSource: Send + Sync {
    async fn supported_codes(&self, key: &ApiKey) -> Result<BTreeSet<CurrencyCode>, ApiError>;
}
