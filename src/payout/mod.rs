pub mod aggregator;
pub mod rates;
pub mod reconciler;
pub mod report;
pub mod window;
