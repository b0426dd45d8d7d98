//! Data fetching
//!
//! Handles:
//! - ORATS data API for historical option IV
//! - Business-day iteration over the requested range
//! - Reduction of raw records into aligned per-leg series

pub mod calendar;
pub mod fetcher;
pub mod orats;

pub use calendar::*;
pub use fetcher::*;
pub use orats::*;
