//! Catalog prices and their minor-unit representation.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static PRICE_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^\s*(₹|Rs\.?|INR)\s*([0-9][0-9,]*)(?:\.([0-9]{1,2}))?\s*$").ok()
});

/// Currencies the checkout integration accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian rupee, 100 paise per rupee
    #[default]
    Inr,
}

impl Currency {
    /// ISO 4217 code sent to the payment provider.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Inr => "INR",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Inr => "₹",
        }
    }

    /// Number of minor units in one major unit.
    #[must_use]
    pub const fn minor_per_major(self) -> u64 {
        match self {
            Self::Inr => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceParseError {
    #[error("price '{0}' is not in a recognised currency format")]
    Format(String),
    #[error("price '{0}' is too large")]
    Overflow(String),
    #[error("price '{0}' must be greater than zero")]
    Zero(String),
}

/// A catalog price, held as an integer amount of minor currency units.
///
/// Prices are authored as display strings (`"₹1499"`, `"Rs. 1,499.50"`) and
/// parsed once when the catalog loads, so a malformed price can never reach
/// a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    currency: Currency,
    minor_units: u64,
}

impl Price {
    #[must_use]
    pub const fn from_minor_units(currency: Currency, minor_units: u64) -> Self {
        Self {
            currency,
            minor_units,
        }
    }

    #[must_use]
    pub const fn currency(self) -> Currency {
        self.currency
    }

    /// Amount in the smallest denomination (paise for rupees).
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.minor_units
    }

    /// Parse a currency-formatted price string.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a recognised currency format,
    /// overflows `u64` minor units, or is zero.
    pub fn parse(text: &str) -> Result<Self, PriceParseError> {
        let captures = PRICE_PATTERN
            .as_ref()
            .and_then(|re| re.captures(text))
            .ok_or_else(|| PriceParseError::Format(text.to_string()))?;

        let currency = Currency::Inr;
        let whole_digits: String = captures[2].chars().filter(char::is_ascii_digit).collect();
        let whole = whole_digits
            .parse::<u64>()
            .map_err(|_| PriceParseError::Overflow(text.to_string()))?;
        let fraction = match captures.get(3).map(|m| m.as_str()) {
            Some(frac) if frac.len() == 1 => frac.parse::<u64>().unwrap_or(0) * 10,
            Some(frac) => frac.parse::<u64>().unwrap_or(0),
            None => 0,
        };

        let minor_units = whole
            .checked_mul(currency.minor_per_major())
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(|| PriceParseError::Overflow(text.to_string()))?;
        if minor_units == 0 {
            return Err(PriceParseError::Zero(text.to_string()));
        }

        Ok(Self {
            currency,
            minor_units,
        })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per = self.currency.minor_per_major();
        let whole = self.minor_units / per;
        let frac = self.minor_units % per;
        if frac == 0 {
            write!(f, "{}{whole}", self.currency.symbol())
        } else {
            write!(f, "{}{whole}.{frac:02}", self.currency.symbol())
        }
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Price {
    type Error = PriceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}
