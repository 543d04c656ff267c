//! Request and result types crossing the service boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::CurrencyCode;

/// A single conversion to perform.
///
/// `amount` is taken as given: negative, zero and non-finite values are passed
/// through to the multiplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(from: CurrencyCode, to: CurrencyCode, amount: f64) -> Self {
        Self { from, to, amount }
    }
}

/// Outcome of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub request: ConversionRequest,
    /// Unrounded `amount * rate`.
    pub converted: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            self.request.amount, self.request.from, self.converted, self.request.to
        )
    }
}
