//! API Key domain type.

use std::fmt;

/// Credential for the exchange-rate API.
///
/// The raw value only leaves this type through [`ApiKey::expose`], so it never
/// shows up in `Debug` output or tracing fields.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for building request URLs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("secret-123");
        assert_eq!(format!("{:?}", key), "ApiKey(****)");
        assert_eq!(key.expose(), "secret-123");
    }
}
