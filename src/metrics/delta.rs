//! Per-leg endpoint deltas

use crate::core::{AlignedTable, LegColumn, OptionLeg};

/// Endpoint IV change for one leg over the fetched period
///
/// Start and end are the column's first and last non-missing values by
/// ascending date, not the table's first and last rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegDelta {
    pub leg: OptionLeg,
    /// First non-missing IV in the period
    pub start_iv: f64,
    /// Last non-missing IV in the period
    pub end_iv: f64,
}

impl LegDelta {
    /// Endpoint delta from one table column, `None` for an all-missing column
    pub fn from_column(column: &LegColumn) -> Option<Self> {
        Some(Self {
            leg: column.leg,
            start_iv: column.first_value()?,
            end_iv: column.last_value()?,
        })
    }

    /// `end_iv - start_iv` in IV points
    pub fn delta(&self) -> f64 {
        self.end_iv - self.start_iv
    }

    /// Percentage change relative to the start; NaN when the start is zero
    pub fn pct_delta(&self) -> f64 {
        if self.start_iv == 0.0 {
            f64::NAN
        } else {
            self.delta() / self.start_iv * 100.0
        }
    }
}

/// Endpoint deltas for every populated column of the table
pub fn leg_deltas(table: &AlignedTable) -> Vec<LegDelta> {
    table
        .columns()
        .iter()
        .filter_map(LegDelta::from_column)
        .collect()
}
