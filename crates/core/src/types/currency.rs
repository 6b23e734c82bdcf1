//! Currencies accepted by the storefront.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Currency`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CurrencyError {
    /// The input string is not a supported currency code.
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// Currencies the storefront can display prices in.
///
/// Sri Lankan rupees are the store's home currency and the default; US
/// dollars are offered for overseas customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Sri Lankan rupee.
    #[default]
    Lkr,
    /// United States dollar.
    Usd,
}

impl Currency {
    /// ISO 4217 currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Lkr => "LKR",
            Self::Usd => "USD",
        }
    }

    /// Symbol used when formatting amounts for display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lkr => "Rs ",
            Self::Usd => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LKR" => Ok(Self::Lkr),
            "USD" => Ok(Self::Usd),
            _ => Err(CurrencyError::Unsupported(s.to_owned())),
        }
    }
}
