//! Option leg definitions
//!
//! A "leg" is one specific option contract (strike + expiration + call/put)
//! whose IV history is being tracked.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{IvError, IvResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Display letter used in leg labels
    pub fn letter(&self) -> &'static str {
        match self {
            OptionType::Call => "C",
            OptionType::Put => "P",
        }
    }

    /// Name of the ORATS record field holding this side's mid IV
    pub fn iv_field(&self) -> &'static str {
        match self {
            OptionType::Call => "callMidIv",
            OptionType::Put => "putMidIv",
        }
    }

    /// Lowercase name as sent in API query parameters
    pub fn api_name(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

/// One option contract being tracked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Strike price
    pub strike: f64,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Option type (Call/Put)
    pub option_type: OptionType,
}

impl OptionLeg {
    pub fn new(strike: f64, expiration: NaiveDate, option_type: OptionType) -> Self {
        Self {
            strike,
            expiration,
            option_type,
        }
    }

    /// Display label: `"{strike} {C|P} {MM/DD/YY}"`
    ///
    /// Labels are display-only; leg identity is the leg value itself, so
    /// two legs that happen to format identically are caught by
    /// [`validate_legs`] instead of being silently conflated.
    pub fn label(&self) -> String {
        format!(
            "{} {} {}",
            self.strike,
            self.option_type.letter(),
            self.expiration.format("%m/%d/%y")
        )
    }

    /// Days from a reference date to expiration
    ///
    /// Used for DTE-at-entry: the reference is the earliest fetched trade
    /// date, not today.
    pub fn days_to_expiration(&self, from: NaiveDate) -> i64 {
        (self.expiration - from).num_days()
    }
}

impl std::fmt::Display for OptionLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Validate a set of legs before fetching
///
/// Rejects:
/// - an empty leg list
/// - duplicate display labels (two legs that would be indistinguishable)
/// - exactly two legs with equal expirations (no short/long assignment exists)
pub fn validate_legs(legs: &[OptionLeg]) -> IvResult<()> {
    if legs.is_empty() {
        return Err(IvError::invalid_input("at least one leg is required"));
    }

    for (i, a) in legs.iter().enumerate() {
        for b in &legs[i + 1..] {
            if a.label() == b.label() {
                return Err(IvError::invalid_input(format!(
                    "duplicate leg: {}",
                    a.label()
                )));
            }
        }
    }

    if legs.len() == 2 && legs[0].expiration == legs[1].expiration {
        return Err(IvError::invalid_input(
            "calendar comparison requires two distinct expirations",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_label_format() {
        let leg = OptionLeg::new(55.0, date(2025, 5, 16), OptionType::Call);
        assert_eq!(leg.label(), "55 C 05/16/25");

        let leg = OptionLeg::new(102.5, date(2025, 6, 20), OptionType::Put);
        assert_eq!(leg.label(), "102.5 P 06/20/25");
    }

    #[test]
    fn test_iv_field_selection() {
        assert_eq!(OptionType::Call.iv_field(), "callMidIv");
        assert_eq!(OptionType::Put.iv_field(), "putMidIv");
    }

    #[test]
    fn test_days_to_expiration() {
        let leg = OptionLeg::new(55.0, date(2025, 6, 20), OptionType::Call);
        assert_eq!(leg.days_to_expiration(date(2025, 4, 6)), 75);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let leg = OptionLeg::new(55.0, date(2025, 5, 16), OptionType::Call);
        let err = validate_legs(&[leg, leg]).unwrap_err();
        assert!(matches!(err, IvError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_equal_expirations() {
        let a = OptionLeg::new(55.0, date(2025, 5, 16), OptionType::Call);
        let b = OptionLeg::new(60.0, date(2025, 5, 16), OptionType::Call);
        let err = validate_legs(&[a, b]).unwrap_err();
        assert!(matches!(err, IvError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_accepts_calendar_pair() {
        let a = OptionLeg::new(55.0, date(2025, 5, 16), OptionType::Call);
        let b = OptionLeg::new(55.0, date(2025, 6, 20), OptionType::Call);
        assert!(validate_legs(&[a, b]).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_legs(&[]).is_err());
    }
}
