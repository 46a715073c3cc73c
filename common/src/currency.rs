use serde::{Deserialize, Serialize};
use std::fmt;

pub const SATS_PER_BTC: u64 = 100_000_000;
pub const SATS_PER_BIT: u64 = 100;

/// Supported crypto display units. Amounts are always carried in satoshis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CryptoUnit {
    #[default]
    Sats,
    Bits,
    Btc,
}

impl fmt::Display for CryptoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoUnit::Sats => write!(f, "sats"),
            CryptoUnit::Bits => write!(f, "bits"),
            CryptoUnit::Btc => write!(f, "BTC"),
        }
    }
}

impl std::str::FromStr for CryptoUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sats" | "sat" => Ok(CryptoUnit::Sats),
            "bits" | "bit" => Ok(CryptoUnit::Bits),
            "btc" => Ok(CryptoUnit::Btc),
            other => Err(format!("unknown unit '{other}' (expected sats, bits or btc)")),
        }
    }
}

impl CryptoUnit {
    pub fn all() -> &'static [CryptoUnit] {
        &[CryptoUnit::Sats, CryptoUnit::Bits, CryptoUnit::Btc]
    }

    /// Format a satoshi amount in this unit, without the unit name.
    pub fn format(self, amount_sats: u64) -> String {
        match self {
            CryptoUnit::Sats => amount_sats.to_string(),
            CryptoUnit::Bits => trim_fraction(amount_sats, SATS_PER_BIT, 2),
            CryptoUnit::Btc => trim_fraction(amount_sats, SATS_PER_BTC, 8),
        }
    }
}

/// Exact decimal rendering with trailing zeros dropped.
fn trim_fraction(amount: u64, per_unit: u64, digits: usize) -> String {
    let whole = amount / per_unit;
    let frac = amount % per_unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0digits$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Fiat price of one bitcoin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiatRate {
    /// ISO 4217 code, e.g. "USD".
    pub code: String,
    pub per_btc: f64,
}

impl FiatRate {
    pub fn convert(&self, amount_sats: u64) -> f64 {
        amount_sats as f64 * self.per_btc / SATS_PER_BTC as f64
    }
}

/// Renders amounts for a payment list entry.
pub trait AmountFormatter {
    /// Crypto amount including the unit name.
    fn crypto(&self, amount_sats: u64) -> String;

    /// Fiat equivalent, if a rate is available.
    fn fiat(&self, amount_sats: u64) -> Option<String>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnitFormatter {
    pub unit: CryptoUnit,
    pub rate: Option<FiatRate>,
}

impl AmountFormatter for UnitFormatter {
    fn crypto(&self, amount_sats: u64) -> String {
        format!("{} {}", self.unit.format(amount_sats), self.unit)
    }

    fn fiat(&self, amount_sats: u64) -> Option<String> {
        self.rate
            .as_ref()
            .map(|rate| format!("{:.2} {}", rate.convert(amount_sats), rate.code))
    }
}
