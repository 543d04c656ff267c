//! # FX Hex
//!
//! Application service layer for the currency converter.
//!
//! ## Architecture
//!
//! - `service/` - Conversion service (orchestrates key, rate and code ports)
//! - `cache/` - Time-bounded cache of supported currency codes
//! - `outbound/` - API key providers (properties file, environment, literal)
//!
//! The service is generic over the port traits, allowing HTTP adapters or
//! in-memory doubles to be injected.

pub mod cache;
pub mod outbound;
pub mod service;


pub use cache::CurrencyCache;
pub use service::ConversionService;
