//! Price-string handling for additional services.
//!
//! Catalog files write service prices the way they appear on the page
//! (`"£150"`, `"£100-500"`, `"+15%"`, `"£50-300/month"`). They are parsed once,
//! at load time, into [`ServicePrice`]; the calculator and the breakdown both
//! classify through [`ServicePrice::one_time_amount`], so they cannot drift.

use crate::domain::catalog::ServicePrice;
use crate::utils::error::{EstimatorError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const DYNAMIC: &str = "dynamic";
pub const QUOTED_SEPARATELY: &str = "Quoted separately";

static PERCENTAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?(\d+)\s*%$").expect("percentage pattern"));
static RECURRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^£(\d+)(?:\s*-\s*£?(\d+))?\s*/\s*(?:month|mo)$").expect("recurring pattern")
});
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^£(\d+)\s*-\s*£?(\d+)$").expect("range pattern"));
static FLAT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^£(\d+)$").expect("flat pattern"));

impl ServicePrice {
    /// Amount added to both estimate bounds, or `None` for prices that are
    /// displayed only (percentages and monthly fees).
    pub fn one_time_amount(&self) -> Option<u64> {
        match *self {
            ServicePrice::Flat(amount) => Some(amount),
            ServicePrice::Range { min, .. } => Some(min),
            ServicePrice::Percentage(_)
            | ServicePrice::Recurring { .. }
            | ServicePrice::Maintenance => None,
        }
    }

    /// Text for a breakdown line. `maintenance_fee` is the monthly fee of the
    /// selected category and only matters for [`ServicePrice::Maintenance`].
    pub fn display(&self, maintenance_fee: Option<u64>) -> String {
        match self {
            ServicePrice::Maintenance => monthly_fee_label(maintenance_fee),
            other => other.to_string(),
        }
    }
}

pub fn monthly_fee_label(fee: Option<u64>) -> String {
    match fee {
        Some(fee) => format!("£{}/month", fee),
        None => QUOTED_SEPARATELY.to_string(),
    }
}

fn parse_amount(raw: &str, digits: &str) -> Result<u64> {
    digits.parse().map_err(|_| EstimatorError::PriceFormatError {
        raw: raw.to_string(),
        reason: format!("amount '{}' is out of range", digits),
    })
}

impl FromStr for ServicePrice {
    type Err = EstimatorError;

    fn from_str(raw: &str) -> Result<Self> {
        let s = raw.trim();

        if s.eq_ignore_ascii_case(DYNAMIC) {
            return Ok(ServicePrice::Maintenance);
        }

        if let Some(caps) = PERCENTAGE_RE.captures(s) {
            let pct = parse_amount(raw, &caps[1])?;
            let pct = u32::try_from(pct).map_err(|_| EstimatorError::PriceFormatError {
                raw: raw.to_string(),
                reason: "percentage is out of range".to_string(),
            })?;
            return Ok(ServicePrice::Percentage(pct));
        }

        if let Some(caps) = RECURRING_RE.captures(s) {
            let min = parse_amount(raw, &caps[1])?;
            let max = caps
                .get(2)
                .map(|m| parse_amount(raw, m.as_str()))
                .transpose()?;
            if max.is_some_and(|max| max < min) {
                return Err(EstimatorError::PriceFormatError {
                    raw: raw.to_string(),
                    reason: "monthly range has max below min".to_string(),
                });
            }
            return Ok(ServicePrice::Recurring { min, max });
        }

        if let Some(caps) = RANGE_RE.captures(s) {
            let min = parse_amount(raw, &caps[1])?;
            let max = parse_amount(raw, &caps[2])?;
            if max < min {
                return Err(EstimatorError::PriceFormatError {
                    raw: raw.to_string(),
                    reason: "range has max below min".to_string(),
                });
            }
            return Ok(ServicePrice::Range { min, max });
        }

        if let Some(caps) = FLAT_RE.captures(s) {
            return Ok(ServicePrice::Flat(parse_amount(raw, &caps[1])?));
        }

        Err(EstimatorError::PriceFormatError {
            raw: raw.to_string(),
            reason: "expected a £ amount, a £ range, a percentage, a monthly fee or \"dynamic\""
                .to_string(),
        })
    }
}

impl TryFrom<String> for ServicePrice {
    type Error = EstimatorError;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<ServicePrice> for String {
    fn from(price: ServicePrice) -> Self {
        price.to_string()
    }
}

impl fmt::Display for ServicePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServicePrice::Flat(amount) => write!(f, "£{}", amount),
            ServicePrice::Range { min, max } => write!(f, "£{}-{}", min, max),
            ServicePrice::Percentage(pct) => write!(f, "+{}%", pct),
            ServicePrice::Recurring { min, max: Some(max) } => write!(f, "£{}-{}/month", min, max),
            ServicePrice::Recurring { min, max: None } => write!(f, "£{}/month", min),
            ServicePrice::Maintenance => f.write_str(DYNAMIC),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_price_kind() {
        assert_eq!("£150".parse::<ServicePrice>().unwrap(), ServicePrice::Flat(150));
        assert_eq!(
            "£100-500".parse::<ServicePrice>().unwrap(),
            ServicePrice::Range { min: 100, max: 500 }
        );
        assert_eq!(
            "£100 - £500".parse::<ServicePrice>().unwrap(),
            ServicePrice::Range { min: 100, max: 500 }
        );
        assert_eq!("+15%".parse::<ServicePrice>().unwrap(), ServicePrice::Percentage(15));
        assert_eq!(
            "£50-300/month".parse::<ServicePrice>().unwrap(),
            ServicePrice::Recurring {
                min: 50,
                max: Some(300)
            }
        );
        assert_eq!(
            "£20/month".parse::<ServicePrice>().unwrap(),
            ServicePrice::Recurring { min: 20, max: None }
        );
        assert_eq!("Dynamic".parse::<ServicePrice>().unwrap(), ServicePrice::Maintenance);
    }

    #[test]
    fn test_malformed_price_is_rejected() {
        for raw in ["", "150", "about £100", "£", "£500-100", "$100", "free"] {
            let err = raw.parse::<ServicePrice>().unwrap_err();
            assert!(
                matches!(err, EstimatorError::PriceFormatError { .. }),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn test_only_flat_and_range_count_as_one_time() {
        assert_eq!(ServicePrice::Flat(150).one_time_amount(), Some(150));
        assert_eq!(
            ServicePrice::Range { min: 100, max: 500 }.one_time_amount(),
            Some(100)
        );
        assert_eq!(ServicePrice::Percentage(15).one_time_amount(), None);
        assert_eq!(
            ServicePrice::Recurring { min: 50, max: Some(300) }.one_time_amount(),
            None
        );
        assert_eq!(ServicePrice::Maintenance.one_time_amount(), None);
    }

    #[test]
    fn test_display_matches_catalog_notation() {
        for raw in ["£150", "£100-500", "+15%", "£50-300/month", "£20/month", "dynamic"] {
            let price: ServicePrice = raw.parse().unwrap();
            assert_eq!(price.to_string(), raw);
        }
        assert_eq!(ServicePrice::Maintenance.display(Some(150)), "£150/month");
        assert_eq!(ServicePrice::Maintenance.display(None), QUOTED_SEPARATELY);
    }
}
