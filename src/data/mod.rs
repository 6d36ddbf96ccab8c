//! Data module - CSV loading and tier normalization

mod loader;
mod processor;

pub use loader::{DataLoader, DataSource};
pub use processor::{parse_number, DataProcessor, Metric, Row, Tier, TierBreakdown};

#[cfg(test)]
pub(crate) use processor::tests::sample_rows;
