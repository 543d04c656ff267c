//! Outbound adapters that do not talk HTTP.

pub mod credentials;

pub use credentials::{ChainedKey, EnvKey, PropertiesFileKey, StaticKey};
