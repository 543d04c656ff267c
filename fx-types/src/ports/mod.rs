//! Port traits (interfaces for adapters).
//!
//! The conversion service depends on these traits, not on concrete HTTP or
//! file-based implementations.

mod country;
mod credentials;
mod exchange;

pub use country::CountryLookup;
pub use credentials::ApiKeyProvider;
pub use exchange::{CurrencyCodeSource, RateSource};
