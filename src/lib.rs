//! # IV Tracker - Option IV History and Calendar-Spread Metrics
//!
//! Fetches daily implied-volatility history for one or more option legs
//! from the ORATS data API, aligns the per-leg series into one table, and
//! derives comparison metrics between the two most recent legs of a
//! calendar pair.
//!
//! ## Overview
//!
//! The pipeline is:
//! - **Fetch**: one blocking request per business day per leg (bulk mode),
//!   or one ranged request per leg (range mode)
//! - **Reduce**: filter raw records to `(tradeDate, iv)` pairs per leg,
//!   scaled to the percentage scale
//! - **Align**: full outer join on trade date, rows ascending, missing
//!   cells explicit
//! - **Metrics**: per-leg endpoint deltas; for exactly two legs, the
//!   calendar-spread metrics (crush, ratio, spread, slope) with fixed
//!   interpretation bands
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use iv_tracker::prelude::*;
//!
//! let client = OratsClient::new(std::env::var("ORATS_TOKEN").unwrap()).unwrap();
//! let fetcher = HistoryFetcher::new(client);
//!
//! let legs = vec![
//!     OptionLeg::new(55.0, NaiveDate::from_ymd_opt(2025, 5, 16).unwrap(), OptionType::Call),
//!     OptionLeg::new(55.0, NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(), OptionType::Call),
//! ];
//!
//! let outcome = fetcher
//!     .fetch(
//!         "SPY",
//!         &legs,
//!         NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
//!     )
//!     .unwrap();
//!
//! let metrics = CalendarMetrics::compute(&outcome.table).unwrap();
//! println!("IV crush: {:.2}", metrics.iv_crush);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Price options or fit volatility surfaces (no model, no Greeks)
//! - Persist anything: every fetch starts from scratch, uncached
//! - Retry, back off, or parallelize: the sequential per-day request
//!   pattern is the behavioral contract downstream rate limits were
//!   sized against
//! - Render charts: presentation is the caller's concern

pub mod core;
pub mod data;
pub mod metrics;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        AlignedTable, FetchWarning, IvError, IvObservation, IvResult, IvSeries, LegColumn,
        OptionLeg, OptionType, validate_legs,
    };

    // Data fetching
    pub use crate::data::{
        CoreRecord, FetchMode, FetchOutcome, HistoryFetcher, OratsClient, StrikeRecord,
        business_days, reduce_by_type, reduce_records,
    };

    // Metrics
    pub use crate::metrics::{
        CalendarMetrics, CrushBand, LegDelta, RatioBand, SlopeBand, SpreadBand, leg_deltas,
    };
}

// Re-export main types at crate root
pub use crate::core::{IvError, IvResult};
pub use crate::data::{HistoryFetcher, OratsClient};
pub use crate::metrics::CalendarMetrics;
