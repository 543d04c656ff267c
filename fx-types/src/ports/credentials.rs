//! API key provider port.

use crate::domain::ApiKey;
use crate::error::ConfigError;

/// Resolves the exchange-rate API credential.
///
/// Called once per service operation, so implementations backed by a file or
/// the environment pick up changes without a restart.
pub trait ApiKeyProvider: Send + Sync {
    fn resolve(&self) -> Result<ApiKey, ConfigError>;
}

impl<P: ApiKeyProvider + ?Sized> ApiKeyProvider for Box<P> {
    fn resolve(&self) -> Result<ApiKey, ConfigError> {
        (**self).resolve()
    }
}
