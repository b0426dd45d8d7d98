//! Core types
//!
//! Option legs, IV time series, the aligned table, and error types.

pub mod error;
pub mod leg;
pub mod series;

pub use error::{FetchWarning, IvError, IvResult};
pub use leg::{OptionLeg, OptionType, validate_legs};
pub use series::{AlignedTable, IvObservation, IvSeries, LegColumn};
