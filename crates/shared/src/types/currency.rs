//! Currency catalog for report computation.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`.
//!
//! Reports work over a fixed set of currencies. Each currency carries both
//! its ISO 4217 letter code and the two-digit numeric code used by the
//! chart-of-accounts catalogs ("01" = MXN, "02" = USD, ...).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currencies supported by the balance reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Mexican Peso (catalog code "01"). Domestic currency.
    Mxn,
    /// US Dollar (catalog code "02").
    Usd,
    /// Japanese Yen (catalog code "06").
    Yen,
    /// Euro (catalog code "27").
    Eur,
    /// Investment unit UDI (catalog code "44").
    Udi,
}

impl Currency {
    /// All report currencies in column order.
    pub const ALL: [Self; 5] = [Self::Mxn, Self::Usd, Self::Yen, Self::Eur, Self::Udi];

    /// Returns the two-digit catalog code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Mxn => "01",
            Self::Usd => "02",
            Self::Yen => "06",
            Self::Eur => "27",
            Self::Udi => "44",
        }
    }

    /// Looks up a currency by its two-digit catalog code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mxn => write!(f, "MXN"),
            Self::Usd => write!(f, "USD"),
            Self::Yen => write!(f, "YEN"),
            Self::Eur => write!(f, "EUR"),
            Self::Udi => write!(f, "UDI"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MXN" | "01" => Ok(Self::Mxn),
            "USD" | "02" => Ok(Self::Usd),
            "YEN" | "JPY" | "06" => Ok(Self::Yen),
            "EUR" | "27" => Ok(Self::Eur),
            "UDI" | "44" => Ok(Self::Udi),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

/// One decimal amount per report currency.
///
/// Explicit fields instead of a runtime-discovered member bag: the set of
/// report currencies is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyBalances {
    /// Amount in Mexican pesos.
    pub mxn: Decimal,
    /// Amount in US dollars.
    pub usd: Decimal,
    /// Amount in Japanese yen.
    pub yen: Decimal,
    /// Amount in euros.
    pub eur: Decimal,
    /// Amount in UDIs.
    pub udi: Decimal,
}

impl CurrencyBalances {
    /// Returns the amount for the given currency.
    #[must_use]
    pub const fn get(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Mxn => self.mxn,
            Currency::Usd => self.usd,
            Currency::Yen => self.yen,
            Currency::Eur => self.eur,
            Currency::Udi => self.udi,
        }
    }

    /// Adds an amount to the given currency column.
    pub fn add(&mut self, currency: Currency, amount: Decimal) {
        match currency {
            Currency::Mxn => self.mxn += amount,
            Currency::Usd => self.usd += amount,
            Currency::Yen => self.yen += amount,
            Currency::Eur => self.eur += amount,
            Currency::Udi => self.udi += amount,
        }
    }
}
