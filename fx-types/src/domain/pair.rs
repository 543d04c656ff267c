//! Currency pairs offered as shortcuts.

use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;

/// A labelled from/to pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub label: String,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CurrencyPair {
    /// Creates a pair labelled `FROM -> TO`.
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self {
            label: format!("{} -> {}", from, to),
            from,
            to,
        }
    }

    /// The default shortcut table: every direction between EUR, USD and MXN.
    pub fn defaults() -> Vec<CurrencyPair> {
        [
            ("EUR", "USD"),
            ("EUR", "MXN"),
            ("USD", "EUR"),
            ("USD", "MXN"),
            ("MXN", "EUR"),
            ("MXN", "USD"),
        ]
        .into_iter()
        .map(|(from, to)| {
            CurrencyPair::new(CurrencyCode::from_static(from), CurrencyCode::from_static(to))
        })
        .collect()
    }
}
