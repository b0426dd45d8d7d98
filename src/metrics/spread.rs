//! Calendar-spread metrics
//!
//! Defined for exactly two legs. The earlier expiration is the short leg.
//! DTE is measured from the earliest trade date in the fetched table
//! (DTE at entry), not from today.

use crate::core::{AlignedTable, IvError, IvResult, OptionLeg};

use super::bands::{CrushBand, RatioBand, SlopeBand, SpreadBand};
use super::delta::LegDelta;

/// Comparison metrics between the short and long leg of a calendar pair
///
/// Undefined ratios/slopes are NaN, never an error: they are displayed as
/// not-a-number and carry no interpretation band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarMetrics {
    pub short_leg: LegDelta,
    pub long_leg: LegDelta,
    /// Days from the table's earliest trade date to the short expiration
    pub dte_short: i64,
    /// Days from the table's earliest trade date to the long expiration
    pub dte_long: i64,
    /// Short-leg endpoint IV change; negative means the IV contracted
    pub iv_crush: f64,
    /// Short end IV over long end IV; NaN when the long end IV is zero
    pub iv_ratio: f64,
    /// Short end IV minus long end IV, IV points
    pub iv_spread: f64,
    /// (long end IV - short end IV) / (dte_long - dte_short); NaN when the
    /// DTEs coincide
    pub iv_slope: f64,
}

impl CalendarMetrics {
    /// Compute the calendar metrics from a two-leg aligned table
    ///
    /// Errors on anything other than exactly two populated legs, and on
    /// equal expirations (no short/long assignment exists; leg validation
    /// normally rejects that pair before any fetch happens).
    pub fn compute(table: &AlignedTable) -> IvResult<Self> {
        if table.n_legs() != 2 {
            return Err(IvError::invalid_input(format!(
                "calendar metrics require exactly 2 legs with data, got {}",
                table.n_legs()
            )));
        }

        let d0 = table
            .earliest_date()
            .ok_or_else(|| IvError::no_data("aligned table has no rows"))?;

        let a = LegDelta::from_column(&table.columns()[0])
            .ok_or_else(|| IvError::no_data("leg column has no values"))?;
        let b = LegDelta::from_column(&table.columns()[1])
            .ok_or_else(|| IvError::no_data("leg column has no values"))?;

        let (short, long) = match a.leg.expiration.cmp(&b.leg.expiration) {
            std::cmp::Ordering::Less => (a, b),
            std::cmp::Ordering::Greater => (b, a),
            std::cmp::Ordering::Equal => {
                return Err(IvError::invalid_input(
                    "calendar comparison requires two distinct expirations",
                ));
            }
        };

        let dte_short = short.leg.days_to_expiration(d0);
        let dte_long = long.leg.days_to_expiration(d0);

        let iv_ratio = if long.end_iv == 0.0 {
            f64::NAN
        } else {
            short.end_iv / long.end_iv
        };

        let iv_slope = if dte_long == dte_short {
            f64::NAN
        } else {
            (long.end_iv - short.end_iv) / (dte_long - dte_short) as f64
        };

        Ok(Self {
            short_leg: short,
            long_leg: long,
            dte_short,
            dte_long,
            iv_crush: short.delta(),
            iv_ratio,
            iv_spread: short.end_iv - long.end_iv,
            iv_slope,
        })
    }

    pub fn short(&self) -> &OptionLeg {
        &self.short_leg.leg
    }

    pub fn long(&self) -> &OptionLeg {
        &self.long_leg.leg
    }

    pub fn crush_band(&self) -> Option<CrushBand> {
        self.iv_crush
            .is_finite()
            .then(|| CrushBand::from_value(self.iv_crush))
    }

    pub fn ratio_band(&self) -> Option<RatioBand> {
        self.iv_ratio
            .is_finite()
            .then(|| RatioBand::from_value(self.iv_ratio))
    }

    pub fn spread_band(&self) -> Option<SpreadBand> {
        self.iv_spread
            .is_finite()
            .then(|| SpreadBand::from_value(self.iv_spread))
    }

    pub fn slope_band(&self) -> Option<SlopeBand> {
        self.iv_slope
            .is_finite()
            .then(|| SlopeBand::from_value(self.iv_slope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IvObservation, IvSeries, OptionType};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(exp: NaiveDate, start_iv: f64, end_iv: f64, d0: NaiveDate, d1: NaiveDate) -> IvSeries {
        let mut s = IvSeries::new(OptionLeg::new(55.0, exp, OptionType::Call));
        s.push(IvObservation {
            trade_date: d0,
            iv: start_iv,
        });
        s.push(IvObservation {
            trade_date: d1,
            iv: end_iv,
        });
        s
    }

    /// 55C 05/16 vs 55C 06/20: short 30->22, long 28->27, dte 40/75
    fn scenario_table() -> AlignedTable {
        // Earliest trade date 2025-04-06: 40 days to 05/16, 75 to 06/20
        let d0 = date(2025, 4, 6);
        let d1 = date(2025, 4, 30);
        let short = series(date(2025, 5, 16), 30.0, 22.0, d0, d1);
        let long = series(date(2025, 6, 20), 28.0, 27.0, d0, d1);
        AlignedTable::from_series(&[long, short]) // order must not matter
    }

    #[test]
    fn test_scenario_values() {
        let m = CalendarMetrics::compute(&scenario_table()).unwrap();

        assert_eq!(m.short().expiration, date(2025, 5, 16));
        assert_eq!(m.long().expiration, date(2025, 6, 20));
        assert_eq!(m.dte_short, 40);
        assert_eq!(m.dte_long, 75);

        assert!((m.iv_crush - (-8.0)).abs() < 1e-9);
        assert!((m.iv_spread - (-5.0)).abs() < 1e-9);
        assert!((m.iv_ratio - 22.0 / 27.0).abs() < 1e-9);
        assert!((m.iv_slope - 5.0 / 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_bands() {
        let m = CalendarMetrics::compute(&scenario_table()).unwrap();

        assert_eq!(m.crush_band(), Some(CrushBand::StrongCrush));
        assert_eq!(m.spread_band(), Some(SpreadBand::NegativeSkew));
        // 22/27 ~= 0.8148, below the 0.85 inverse-skew floor
        assert_eq!(m.ratio_band(), Some(RatioBand::Unusual));
        // 5/35 ~= 0.1429, inside (0.1, 0.4]
        assert_eq!(m.slope_band(), Some(SlopeBand::MildUpward));
    }

    #[test]
    fn test_ratio_nan_when_long_end_zero() {
        let d0 = date(2025, 4, 7);
        let d1 = date(2025, 4, 30);
        let short = series(date(2025, 5, 16), 30.0, 22.0, d0, d1);
        let long = series(date(2025, 6, 20), 28.0, 0.0, d0, d1);
        let table = AlignedTable::from_series(&[short, long]);

        let m = CalendarMetrics::compute(&table).unwrap();
        assert!(m.iv_ratio.is_nan());
        assert!(m.ratio_band().is_none());
        // Other metrics stay defined
        assert!(m.iv_spread.is_finite());
        assert!(m.iv_slope.is_finite());
    }

    #[test]
    fn test_rejects_wrong_leg_count() {
        let d0 = date(2025, 4, 7);
        let d1 = date(2025, 4, 30);
        let only = series(date(2025, 5, 16), 30.0, 22.0, d0, d1);
        let table = AlignedTable::from_series(&[only]);

        assert!(matches!(
            CalendarMetrics::compute(&table),
            Err(IvError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_equal_expirations() {
        let d0 = date(2025, 4, 7);
        let d1 = date(2025, 4, 30);
        let exp = date(2025, 5, 16);
        let mut a = series(exp, 30.0, 22.0, d0, d1);
        // Distinct strike so both legs survive alignment
        a.leg.strike = 60.0;
        let b = series(exp, 28.0, 27.0, d0, d1);
        // Columns come from distinct series even with one date overlap
        let table = AlignedTable::from_series(&[a, b]);

        assert!(matches!(
            CalendarMetrics::compute(&table),
            Err(IvError::InvalidInput(_))
        ));
    }
}
