//! IV history fetching
//!
//! Drives the per-leg fetch loop against the ORATS client, reduces raw
//! records to per-leg IV series, and aligns them into one table.
//!
//! The loop is deliberately sequential and uncached: one blocking request
//! per business day per leg in daily mode. Downstream rate-limit and cost
//! assumptions were built against that request pattern, so it is part of
//! the behavioral contract here, not an implementation detail to optimize.

use chrono::NaiveDate;

use super::calendar::business_days;
use super::orats::{OratsClient, StrikeRecord};
use crate::core::{
    AlignedTable, FetchWarning, IvError, IvObservation, IvResult, IvSeries, OptionLeg, OptionType,
    validate_legs,
};

/// How requests are grouped for a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// One `hist/strikes` request per business day per leg; all strikes
    /// come back and are filtered client-side.
    Daily,
    /// One `option-history` request per leg for the whole range, with a
    /// field projection and the strike pinned upstream.
    Range,
}

/// Result of a fetch: the aligned table plus any non-fatal warnings
#[derive(Debug)]
pub struct FetchOutcome {
    pub table: AlignedTable,
    pub warnings: Vec<FetchWarning>,
}

/// Fetches daily IV history for a set of legs
pub struct HistoryFetcher {
    client: OratsClient,
}

impl HistoryFetcher {
    pub fn new(client: OratsClient) -> Self {
        Self { client }
    }

    /// Fetch IV history in daily (bulk) mode
    pub fn fetch(
        &self,
        ticker: &str,
        legs: &[OptionLeg],
        start: NaiveDate,
        end: NaiveDate,
    ) -> IvResult<FetchOutcome> {
        self.fetch_with_mode(ticker, legs, start, end, FetchMode::Daily)
    }

    /// Ranged fetch with no per-leg reduction target
    ///
    /// One `option-history` request for the whole range with a field
    /// projection. With `strike` set the strike is pinned (upstream and
    /// client-side, exact f64 equality); with `None` every record quoting
    /// the requested side comes back, across all strikes and expirations.
    /// Observations are sorted ascending by trade date; duplicate dates are
    /// kept since there is no single contract to collapse them onto.
    pub fn fetch_range(
        &self,
        ticker: &str,
        option_type: OptionType,
        start: NaiveDate,
        end: NaiveDate,
        strike: Option<f64>,
    ) -> IvResult<Vec<IvObservation>> {
        tracing::info!(ticker, ?option_type, ?strike, "fetching ranged IV history");

        let records = self
            .client
            .option_history(ticker, option_type, start, end, strike)?;
        let observations = reduce_by_type(&records, option_type, strike);

        if observations.is_empty() {
            return Err(IvError::no_data(format!(
                "no IV data for {} between {} and {}",
                ticker, start, end
            )));
        }

        Ok(observations)
    }

    /// Fetch IV history with an explicit request-grouping mode
    ///
    /// Failures are local: a failed day (or failed range request) becomes a
    /// warning and iteration continues with partial results. Only the case
    /// where every leg comes back empty is a hard error.
    pub fn fetch_with_mode(
        &self,
        ticker: &str,
        legs: &[OptionLeg],
        start: NaiveDate,
        end: NaiveDate,
        mode: FetchMode,
    ) -> IvResult<FetchOutcome> {
        validate_legs(legs)?;

        let days = business_days(start, end);
        tracing::info!(
            ticker,
            legs = legs.len(),
            days = days.len(),
            ?mode,
            "fetching IV history"
        );

        let mut warnings = Vec::new();
        let mut series = Vec::with_capacity(legs.len());

        for leg in legs {
            let mut leg_series = IvSeries::new(*leg);

            match mode {
                FetchMode::Daily => {
                    for &day in &days {
                        match self.client.strikes_history(ticker, day) {
                            Ok(records) => {
                                for obs in reduce_records(&records, leg) {
                                    leg_series.push(obs);
                                }
                            }
                            Err(e) => {
                                tracing::warn!("{}: fetch failed on {}: {}", leg, day, e);
                                warnings.push(FetchWarning::Upstream {
                                    date: day,
                                    message: e.to_string(),
                                });
                            }
                        }
                    }
                }
                FetchMode::Range => {
                    match self.client.option_history(
                        ticker,
                        leg.option_type,
                        start,
                        end,
                        Some(leg.strike),
                    ) {
                        Ok(records) => {
                            for obs in reduce_records(&records, leg) {
                                leg_series.push(obs);
                            }
                        }
                        Err(e) => {
                            tracing::warn!("{}: range fetch failed: {}", leg, e);
                            warnings.push(FetchWarning::Upstream {
                                date: start,
                                message: e.to_string(),
                            });
                        }
                    }
                }
            }

            if leg_series.is_empty() {
                tracing::warn!("{}: no observations in range", leg);
                warnings.push(FetchWarning::EmptyLeg { label: leg.label() });
            }
            series.push(leg_series);
        }

        if series.iter().all(|s| s.is_empty()) {
            return Err(IvError::no_data(format!(
                "no IV data for any leg of {} between {} and {}",
                ticker, start, end
            )));
        }

        let table = AlignedTable::from_series(&series);
        tracing::info!(
            rows = table.n_rows(),
            legs = table.n_legs(),
            warnings = warnings.len(),
            "fetch complete"
        );

        Ok(FetchOutcome { table, warnings })
    }
}

/// Reduce raw strike records to one leg's observations
///
/// Matching is exact: strike by f64 equality (no tolerance, callers supply
/// strikes at matching precision) and expiration by `YYYY-MM-DD` string
/// equality. Records lacking the leg's IV side are skipped, never zeroed.
/// IV is scaled to the percentage scale here.
pub fn reduce_records(records: &[StrikeRecord], leg: &OptionLeg) -> Vec<IvObservation> {
    let expir = leg.expiration.format("%Y-%m-%d").to_string();

    records
        .iter()
        .filter(|r| r.strike == Some(leg.strike) && r.expir_date == expir)
        .filter_map(|r| {
            let iv = r.mid_iv(leg.option_type)?;
            let trade_date = NaiveDate::parse_from_str(&r.trade_date, "%Y-%m-%d").ok()?;
            Some(IvObservation {
                trade_date,
                iv: iv * 100.0,
            })
        })
        .collect()
}

/// Reduce raw records for a ranged, optionally unpinned query
///
/// Selects the IV side by option type and optionally filters by exact
/// strike equality; with no strike every quoting record contributes one
/// observation. Output is sorted ascending by trade date (stable, so
/// identical input yields identical output).
pub fn reduce_by_type(
    records: &[StrikeRecord],
    option_type: OptionType,
    strike: Option<f64>,
) -> Vec<IvObservation> {
    let mut observations: Vec<IvObservation> = records
        .iter()
        .filter(|r| strike.map_or(true, |s| r.strike == Some(s)))
        .filter_map(|r| {
            let iv = r.mid_iv(option_type)?;
            let trade_date = NaiveDate::parse_from_str(&r.trade_date, "%Y-%m-%d").ok()?;
            Some(IvObservation {
                trade_date,
                iv: iv * 100.0,
            })
        })
        .collect();

    observations.sort_by_key(|o| o.trade_date);
    observations
}
