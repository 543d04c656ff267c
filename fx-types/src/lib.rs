//! # FX Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Currency codes, rate tables, API keys, currency pairs
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Conversion request and result
//! - `error/` - Error taxonomy shared by every layer

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ApiKey, CurrencyCode, CurrencyPair, RateTable};
pub use dto::{Conversion, ConversionRequest};
pub use error::{ApiError, ConfigError, ConversionError, DomainError, LookupError};
pub use ports::{ApiKeyProvider, CountryLookup, CurrencyCodeSource, RateSource};
