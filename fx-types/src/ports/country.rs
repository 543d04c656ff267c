//! Country-to-currency lookup port.

use crate::domain::CurrencyCode;
use crate::error::LookupError;

#[async_trait::async_trait]
pub trait CountryLookup: Send + Sync {
    /// Returns the first currency of the first country matching `name`.
    async fn currency_for_country(&self, name: &str) -> Result<CurrencyCode, LookupError>;
}
