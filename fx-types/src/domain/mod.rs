//! Domain models for the currency converter.

pub mod api_key;
pub mod currency;
pub mod pair;

pub use api_key::ApiKey;
pub use currency::{CurrencyCode, RateTable};
pub use pair::CurrencyPair;
