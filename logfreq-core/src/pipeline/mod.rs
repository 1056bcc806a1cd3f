//! Fan-out/fan-in runtime for the analysis.
//!
//! producer (HourBatcher)
//! batch queue
//! WorkerPool (N x tally)
//! result queue
//! ResultStream
//!
//! The two bounded queues are the only state shared between tasks.

mod error;
mod handle;
mod producer;
mod setup;
mod workers;

pub use error::PipelineError;
pub use handle::{PipelineSummary, ResultStream};
pub use producer::{ProducerOutcome, spawn_producer};
pub use setup::Pipeline;
pub use workers::{WorkerPool, WorkerStats};
