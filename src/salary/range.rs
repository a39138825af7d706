use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::util::text::group_thousands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Iqd,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Iqd => "IQD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Iqd => "IQD",
        }
    }

    /// Plural currency name appended to the words rendering.
    pub fn spoken_name(&self) -> &'static str {
        match self {
            Self::Usd => "US Dollars",
            Self::Iqd => "Iraqi Dinars",
        }
    }

    pub fn range(&self) -> SalaryRange {
        match self {
            Self::Usd => SalaryRange {
                min: 300,
                max: 50_000,
            },
            Self::Iqd => SalaryRange {
                min: 350_000,
                max: 70_000_000,
            },
        }
    }

    /// Formats an amount the way the form messages do: `$300`, `350,000 IQD`.
    pub fn display_amount(&self, amount: u64) -> String {
        match self {
            Self::Usd => format!("{}{}", self.symbol(), group_thousands(amount)),
            Self::Iqd => format!("{} {}", group_thousands(amount), self.symbol()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USD" => Ok(Self::Usd),
            "IQD" => Ok(Self::Iqd),
            other => Err(format!("Unsupported currency '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
}

impl SalaryRange {
    pub fn contains(&self, amount: i64) -> bool {
        amount >= self.min as i64 && amount <= self.max as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Bound {
    Min(u64),
    Max(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct OutOfRangeError {
    pub currency: Currency,
    pub amount: i64,
    pub bound: Bound,
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound {
            Bound::Min(min) => write!(
                f,
                "Minimum {} salary is {}",
                self.currency,
                self.currency.display_amount(min)
            ),
            Bound::Max(max) => write!(
                f,
                "Maximum {} salary is {}",
                self.currency,
                self.currency.display_amount(max)
            ),
        }
    }
}

/// Outcome of a range check that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Currency unset or unknown, or amount missing: nothing to check yet.
    NoOp,
    Valid { currency: Currency, amount: u64 },
}

pub fn validate(currency: &str, amount: Option<i64>) -> Result<Validation, OutOfRangeError> {
    let Ok(currency) = currency.parse::<Currency>() else {
        return Ok(Validation::NoOp);
    };
    let Some(amount) = amount else {
        return Ok(Validation::NoOp);
    };
    check_range(currency, amount).map(|amount| Validation::Valid { currency, amount })
}

pub fn check_range(currency: Currency, amount: i64) -> Result<u64, OutOfRangeError> {
    let range = currency.range();
    if range.contains(amount) {
        return Ok(amount as u64);
    }
    let bound = if amount < range.min as i64 {
        Bound::Min(range.min)
    } else {
        Bound::Max(range.max)
    };
    Err(OutOfRangeError {
        currency,
        amount,
        bound,
    })
}

#[cfg(test)]
mod tests {
    use super::{validate, Bound, Currency, Validation};

    fn bound_of(currency: &str, amount: i64) -> Bound {
        validate(currency, Some(amount))
            .expect_err("out of range")
            .bound
    }

    #[test]
    fn usd_limits_are_inclusive() {
        assert_eq!(bound_of("USD", 299), Bound::Min(300));
        assert_eq!(
            validate("USD", Some(300)).expect("ok"),
            Validation::Valid {
                currency: Currency::Usd,
                amount: 300
            }
        );
        assert!(validate("USD", Some(50_000)).is_ok());
        assert_eq!(bound_of("USD", 50_001), Bound::Max(50_000));
    }

    #[test]
    fn iqd_limits_are_inclusive() {
        assert_eq!(bound_of("IQD", 349_999), Bound::Min(350_000));
        assert!(validate("IQD", Some(350_000)).is_ok());
        assert!(validate("IQD", Some(70_000_000)).is_ok());
        assert_eq!(bound_of("IQD", 70_000_001), Bound::Max(70_000_000));
    }

    #[test]
    fn unset_currency_or_amount_is_a_no_op() {
        assert_eq!(validate("", Some(1000)).expect("no-op"), Validation::NoOp);
        assert_eq!(validate("EUR", Some(1000)).expect("no-op"), Validation::NoOp);
        assert_eq!(validate("USD", None).expect("no-op"), Validation::NoOp);
    }

    #[test]
    fn negative_amounts_fail_the_minimum() {
        let err = validate("USD", Some(-5)).expect_err("negative");
        assert_eq!(err.amount, -5);
        assert_eq!(err.currency, Currency::Usd);
    }

    #[test]
    fn error_text_matches_form_messages() {
        let msg = |c: &str, a: i64| validate(c, Some(a)).expect_err("err").to_string();
        assert_eq!(msg("USD", 1), "Minimum USD salary is $300");
        assert_eq!(msg("USD", 60_000), "Maximum USD salary is $50,000");
        assert_eq!(msg("IQD", 1), "Minimum IQD salary is 350,000 IQD");
        assert_eq!(msg("IQD", 80_000_000), "Maximum IQD salary is 70,000,000 IQD");
    }

    #[test]
    fn symbols_and_ranges_per_currency() {
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!(Currency::Iqd.symbol(), "IQD");
        assert_eq!(Currency::Usd.display_amount(12_500), "$12,500");
        assert_eq!(Currency::Iqd.display_amount(1_450_000), "1,450,000 IQD");

        let usd = Currency::Usd.range();
        assert!(usd.contains(300));
        assert!(usd.contains(50_000));
        assert!(!usd.contains(299));
        assert!(!usd.contains(50_001));
        assert!(!usd.contains(-300));
    }
}
