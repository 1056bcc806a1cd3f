//! Hourly frequency analysis
//!
//! Raw lines are grouped into batches at every hour-of-day transition, and each
//! batch is reduced to its most frequent (source, message) pair.
//!
//! raw line
//! HourBatcher
//! Batch
//! tally / summarize
//! ResultRecord
//!

mod aggregate;
mod batcher;
mod entry;
#[cfg(test)]
mod tests;

pub use aggregate::*;
pub use batcher::*;
pub use entry::*;
