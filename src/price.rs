//! Heuristic currency amount extraction

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// Amount grammar shared by both rules: 1-3 digits, comma-grouped thousands,
// optional 1-2 digit fraction. ASCII digits and ASCII whitespace only.
static PREFIX_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(฿|\$|THB|USD)[\t\n\f\r ]?([0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{1,2})?)").unwrap()
});

static SUFFIX_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"([0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{1,2})?)[\t\n\f\r ]?(บาท|THB|USD|฿|\$)").unwrap()
});

/// Where the currency token sat relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyPlacement {
    /// `$50`, `THB1,200`
    Prefix,
    /// `500 บาท`, `20 USD`
    Suffix,
}

/// An extracted price
///
/// Serializes to the same compact string it displays as, so `$ 50` in the
/// source text comes out as `"$50"` and `500บาท` as `"500 บาท"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Price {
    /// Amount exactly as written, separators included
    pub amount: String,

    /// Currency symbol, code or word
    pub currency: String,

    pub placement: CurrencyPlacement,
}

impl Price {
    /// Amount as a number, with thousands separators dropped
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.amount.replace(',', "").parse().ok()
    }

    /// ISO 4217 code for the currency token
    #[must_use]
    pub fn currency_code(&self) -> &'static str {
        match self.currency.as_str() {
            "$" | "USD" => "USD",
            _ => "THB",
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.placement {
            CurrencyPlacement::Prefix => write!(f, "{}{}", self.currency, self.amount),
            CurrencyPlacement::Suffix => write!(f, "{} {}", self.amount, self.currency),
        }
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

impl TryFrom<String> for Price {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        extract_price(&value)
            .filter(|price| price.to_string() == value)
            .ok_or_else(|| format!("not a price: {value:?}"))
    }
}

/// Find the first price mentioned in `text`
///
/// A currency token in front of the amount is tried first over the whole
/// text; only if nothing matches is an amount followed by a token tried.
/// Within a rule the leftmost match wins.
///
/// ```rust
/// use inbox_extract::extract_price;
///
/// let price = extract_price("Price: $50 today").unwrap();
/// assert_eq!(price.to_string(), "$50");
/// assert!(extract_price("no price here").is_none());
/// ```
#[must_use]
pub fn extract_price(text: &str) -> Option<Price> {
    if let Some(cap) = PREFIX_REGEX.captures(text) {
        return Some(Price {
            currency: cap[1].to_string(),
            amount: cap[2].to_string(),
            placement: CurrencyPlacement::Prefix,
        });
    }

    SUFFIX_REGEX.captures(text).map(|cap| Price {
        amount: cap[1].to_string(),
        currency: cap[2].to_string(),
        placement: CurrencyPlacement::Suffix,
    })
}
