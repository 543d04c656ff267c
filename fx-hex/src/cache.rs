//! Time-bounded cache of the supported currency codes.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use fx_types::{ApiError, ApiKey, CurrencyCode, CurrencyCodeSource};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// How long a fetched code set stays fresh unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

struct CacheEntry {
    codes: Arc<BTreeSet<CurrencyCode>>,
    fetched_at: Instant,
}

/// Memoizes [`CurrencyCodeSource::supported_codes`] for a freshness window.
///
/// The entry is held behind an async mutex for the whole check-and-refresh
/// sequence: at most one refresh is in flight, and the code set and its
/// timestamp are always read and replaced together.
pub struct CurrencyCache<S> {
    source: S,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: CurrencyCodeSource> CurrencyCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the cached codes, refreshing them once the window has elapsed.
    ///
    /// A failed refresh leaves the previous entry in place; the next call
    /// retries.
    #[instrument(skip_all)]
    pub async fn get_all(&self, key: &ApiKey) -> Result<Arc<BTreeSet<CurrencyCode>>, ApiError> {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                debug!("Serving {} currency codes from cache", cached.codes.len());
                return Ok(Arc::clone(&cached.codes));
            }
        }

        let codes = match self.source.supported_codes(key).await {
            Ok(codes) => Arc::new(codes),
            Err(e) => {
                warn!("Currency code refresh failed: {}", e);
                return Err(e);
            }
        };

        info!("Cached {} supported currency codes", codes.len());
        *entry = Some(CacheEntry {
            codes: Arc::clone(&codes),
            fetched_at: Instant::now(),
        });
        Ok(codes)
    }

    /// Returns the current entry, fresh or not, without fetching.
    pub async fn snapshot(&self) -> Option<Arc<BTreeSet<CurrencyCode>>> {
        self.entry
            .lock()
            .await
            .as_ref()
            .map(|cached| Arc::clone(&cached.codes))
    }

    /// Drops the entry so the next `get_all` fetches.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
