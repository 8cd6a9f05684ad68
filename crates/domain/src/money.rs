//! Money amounts for course pricing.

/// Money amount in BRL, represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents (e.g., 150000 = R$ 1500.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from whole reais.
    pub fn from_reais(reais: i64) -> Self {
        Self {
            cents: reais * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole reais portion.
    pub fn reais(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after reais).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Returns the amount as a decimal number of reais, as payment APIs expect.
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-R$ {}.{:02}", self.reais().abs(), self.cents_part())
        } else {
            write!(f, "R$ {}.{:02}", self.reais(), self.cents_part())
        }
    }
}
