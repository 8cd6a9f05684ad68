//! Static course code to price lookup.

use std::collections::BTreeMap;

use crate::money::Money;

/// Course code for the flagship course offered through checkout.
pub const EEB: &str = "EEB";

/// Maps course codes to their enrollment price.
///
/// Codes are matched exactly. Unknown codes price at zero rather than being
/// rejected; callers that care can check [`CourseCatalog::contains`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCatalog {
    prices: BTreeMap<String, Money>,
}

impl CourseCatalog {
    /// Creates a catalog from `(code, price)` pairs.
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Money)>,
        K: Into<String>,
    {
        Self {
            prices: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Returns the price for `code`, or zero when the code is unknown.
    pub fn price_of(&self, code: &str) -> Money {
        self.prices.get(code).copied().unwrap_or_else(Money::zero)
    }

    /// Returns true if the catalog lists `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.prices.contains_key(code)
    }

    /// Iterates over `(code, price)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::new([(EEB, Money::from_reais(1500))])
    }
}
