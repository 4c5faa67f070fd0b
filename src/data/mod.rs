/// Static co-benefits dataset.
pub mod metrics;
