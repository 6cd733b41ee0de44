//! Stock markets and their fee/tax policy.
//!
//! - [`Market`] - The exchange a trade was placed on
//! - [`FeeSchedule`] - Broker fee and transaction tax rates for a market

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Broker fee and sell-side tax rates, as fractions (0.001425 = 0.1425%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Fee rate charged on both the buy and the sell amount.
    pub fee_rate: Decimal,
    /// Tax rate charged on the sell amount only.
    pub tax_rate: Decimal,
}

/// Market a trade belongs to.
///
/// Records without a market are Taiwan trades.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Market {
    /// Taiwan Stock Exchange.
    #[default]
    #[serde(rename = "TW")]
    Tw,
    /// United States.
    #[serde(rename = "US")]
    Us,
    /// United Kingdom.
    #[serde(rename = "UK")]
    Uk,
}

impl Market {
    /// All markets in tab order.
    pub const ALL: [Market; 3] = [Market::Tw, Market::Us, Market::Uk];

    /// Fee and tax policy for this market.
    ///
    /// Taiwan uses the regulated broker fee and securities transaction tax.
    /// The other markets use a flat placeholder brokerage rate and no tax.
    #[must_use]
    pub const fn fee_schedule(self) -> FeeSchedule {
        match self {
            Self::Tw => FeeSchedule {
                fee_rate: dec!(0.001425),
                tax_rate: dec!(0.003),
            },
            Self::Us | Self::Uk => FeeSchedule {
                fee_rate: dec!(0.001),
                tax_rate: Decimal::ZERO,
            },
        }
    }

    /// Two-letter market code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tw => "TW",
            Self::Us => "US",
            Self::Uk => "UK",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Market {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TW" => Ok(Self::Tw),
            "US" => Ok(Self::Us),
            "UK" => Ok(Self::Uk),
            _ => Err(DomainError::UnknownMarket(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taiwan_has_fee_and_tax() {
        let schedule = Market::Tw.fee_schedule();
        assert_eq!(schedule.fee_rate, dec!(0.001425));
        assert_eq!(schedule.tax_rate, dec!(0.003));
    }

    #[test]
    fn foreign_markets_have_flat_fee_no_tax() {
        for market in [Market::Us, Market::Uk] {
            let schedule = market.fee_schedule();
            assert_eq!(schedule.fee_rate, dec!(0.001));
            assert_eq!(schedule.tax_rate, Decimal::ZERO);
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("tw".parse::<Market>().unwrap(), Market::Tw);
        assert_eq!(" Us ".parse::<Market>().unwrap(), Market::Us);
        assert!(matches!(
            "JP".parse::<Market>(),
            Err(DomainError::UnknownMarket(code)) if code == "JP"
        ));
    }

    #[test]
    fn serializes_as_uppercase_code() {
        assert_eq!(serde_json::to_string(&Market::Uk).unwrap(), "\"UK\"");
        let market: Market = serde_json::from_str("\"US\"").unwrap();
        assert_eq!(market, Market::Us);
    }

    #[test]
    fn default_market_is_taiwan() {
        assert_eq!(Market::default(), Market::Tw);
    }
}
