//! Derived comparison metrics
//!
//! Per-leg endpoint deltas for any number of legs, and the calendar-spread
//! metrics (crush, ratio, spread, slope) with their interpretation bands
//! when exactly two legs are compared.

pub mod bands;
pub mod delta;
pub mod spread;

pub use bands::{CrushBand, RatioBand, SlopeBand, SpreadBand};
pub use delta::{LegDelta, leg_deltas};
pub use spread::CalendarMetrics;
