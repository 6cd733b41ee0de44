//! Trade table ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::calculator::TradeCalculations;
use super::trade::Trade;

/// Column the trade table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Buy date.
    #[default]
    Date,
    /// Stock name.
    Stock,
    /// Total cost including the buy fee.
    Cost,
    /// Buy fee + sell fee + tax.
    Fees,
    /// Realized profit (zero while held).
    Profit,
    /// Realized profit percentage (zero while held).
    ProfitPercent,
    /// Holding days.
    Holding,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Date,
        SortKey::Stock,
        SortKey::Cost,
        SortKey::Fees,
        SortKey::Profit,
        SortKey::ProfitPercent,
        SortKey::Holding,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Stock => "stock",
            Self::Cost => "cost",
            Self::Fees => "fees",
            Self::Profit => "profit",
            Self::ProfitPercent => "profit-percent",
            Self::Holding => "holding",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "profitpercent" => "profit-percent".to_string(),
            other => other.to_string(),
        };
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown sort key '{s}', expected one of: {}", names.join(", "))
            })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(format!("unknown sort direction '{s}', expected asc or desc")),
        }
    }
}

/// Active ordering of the trade table. Defaults to newest buy first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Ordering after the user selects `key`.
    ///
    /// Selecting the active key flips the direction; a new key starts
    /// descending.
    #[must_use]
    pub fn select(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.reversed())
        } else {
            Self::new(key, SortDirection::Desc)
        }
    }

    /// Compare two rows under this ordering.
    #[must_use]
    pub fn compare(
        &self,
        (a, a_calc): (&Trade, &TradeCalculations),
        (b, b_calc): (&Trade, &TradeCalculations),
    ) -> Ordering {
        let ordering = match self.key {
            SortKey::Date => a.buy_date().cmp(&b.buy_date()),
            SortKey::Stock => a.name().cmp(b.name()),
            SortKey::Cost => a_calc.total_cost.cmp(&b_calc.total_cost),
            SortKey::Fees => a_calc.total_charges().cmp(&b_calc.total_charges()),
            SortKey::Profit => a_calc.profit.cmp(&b_calc.profit),
            SortKey::ProfitPercent => a_calc.profit_percent.cmp(&b_calc.profit_percent),
            SortKey::Holding => a_calc.holding_days.cmp(&b_calc.holding_days),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}
