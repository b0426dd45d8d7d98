//! IV time series and alignment
//!
//! Per-leg daily IV observations and the aligned multi-leg table the
//! metrics are computed from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::leg::OptionLeg;

/// One daily IV observation
///
/// `iv` is on the percentage scale (0–100+); scaling from the API's decimal
/// fraction happens at reduction time, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvObservation {
    /// Trade date the IV was observed on
    pub trade_date: NaiveDate,
    /// Implied volatility, percentage scale
    pub iv: f64,
}

/// Daily IV history for one leg
///
/// Observations are kept strictly ascending by trade date with no
/// duplicates; gaps (missing trading days) are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvSeries {
    /// The leg this series belongs to
    pub leg: OptionLeg,
    observations: Vec<IvObservation>,
}

impl IvSeries {
    pub fn new(leg: OptionLeg) -> Self {
        Self {
            leg,
            observations: Vec::new(),
        }
    }

    /// Add an observation, keeping the ascending/no-duplicate invariant
    ///
    /// A second observation for an already-present date is ignored; the
    /// first one wins.
    pub fn push(&mut self, obs: IvObservation) {
        match self
            .observations
            .binary_search_by_key(&obs.trade_date, |o| o.trade_date)
        {
            Ok(_) => {}
            Err(idx) => self.observations.insert(idx, obs),
        }
    }

    pub fn observations(&self) -> &[IvObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Value on a specific trade date, if observed
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.observations
            .binary_search_by_key(&date, |o| o.trade_date)
            .ok()
            .map(|idx| self.observations[idx].iv)
    }
}

/// One leg's column in an [`AlignedTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegColumn {
    /// The leg the column belongs to (carried by value; labels are display-only)
    pub leg: OptionLeg,
    /// One cell per table row; `None` marks a date the leg was not quoted on
    pub values: Vec<Option<f64>>,
}

impl LegColumn {
    /// First non-missing value by ascending date
    pub fn first_value(&self) -> Option<f64> {
        self.values.iter().flatten().next().copied()
    }

    /// Last non-missing value by ascending date
    pub fn last_value(&self) -> Option<f64> {
        self.values.iter().flatten().next_back().copied()
    }
}

/// Full outer join of per-leg IV series on trade date
///
/// Rows are sorted ascending by date; each leg contributes one column.
/// Missing leg/date cells are `None`, never zero. Endpoint metrics read
/// each column's first/last non-missing value, not the first/last row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTable {
    dates: Vec<NaiveDate>,
    columns: Vec<LegColumn>,
}

impl AlignedTable {
    /// Build the table from one series per leg
    ///
    /// Series with zero observations contribute nothing; the caller is
    /// responsible for surfacing a warning for those (see the fetcher).
    pub fn from_series(series: &[IvSeries]) -> Self {
        let populated: Vec<&IvSeries> = series.iter().filter(|s| !s.is_empty()).collect();

        let dates: Vec<NaiveDate> = populated
            .iter()
            .flat_map(|s| s.observations().iter().map(|o| o.trade_date))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let columns = populated
            .iter()
            .map(|s| LegColumn {
                leg: s.leg,
                values: dates.iter().map(|&d| s.value_on(d)).collect(),
            })
            .collect();

        Self { dates, columns }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[LegColumn] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    pub fn n_legs(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Earliest trade date present in the table
    ///
    /// This is the DTE-at-entry reference date for the spread metrics.
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Column for a given leg, if present
    pub fn column_for(&self, leg: &OptionLeg) -> Option<&LegColumn> {
        self.columns.iter().find(|c| &c.leg == leg)
    }
}
