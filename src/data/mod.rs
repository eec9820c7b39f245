/// Data layer: core types, loading, sampling, filtering and aggregation.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TradeDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sample   │  seeded draw without replacement → TradeSample
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  equality predicates → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  counts, monthly means, box stats, sums, correlation
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;

use thiserror::Error;

/// Errors raised by the data layer itself (I/O and CSV errors travel as
/// `anyhow` chains from the loader).
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("requested a sample of {requested} rows but the dataset has only {available}")]
    SampleTooLarge { requested: usize, available: usize },

    #[error("'{value}' is not a DD-MM-YYYY date")]
    InvalidDate { value: String },
}
