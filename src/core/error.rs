//! Error types for IV tracking

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IvError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream error: HTTP {status} for {context}")]
    Upstream { status: u16, context: String },

    #[error("No data: {0}")]
    NoData(String),
}

pub type IvResult<T> = Result<T, IvError>;

impl IvError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }
}

/// Non-fatal problems collected during a fetch.
///
/// Warnings never abort the fetch; they are appended in iteration order
/// (legs outer, dates inner) and handed back with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchWarning {
    /// Upstream returned a non-success status other than 404 for one day.
    Upstream {
        date: chrono::NaiveDate,
        message: String,
    },
    /// A leg produced zero observations over the whole range.
    EmptyLeg { label: String },
}

impl std::fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchWarning::Upstream { date, message } => {
                write!(f, "{}: {}", date, message)
            }
            FetchWarning::EmptyLeg { label } => {
                write!(f, "no data returned for leg {}", label)
            }
        }
    }
}
