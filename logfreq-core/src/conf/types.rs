use crate::conf::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::thread;

pub const DEFAULT_BATCH_QUEUE_CAPACITY: usize = 128;
pub const DEFAULT_RESULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogfreqConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Sizing of the batch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Number of aggregation workers. Defaults to the available parallelism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    /// Bound on batches waiting for a worker.
    #[serde(default = "default_batch_queue_capacity")]
    pub batch_queue_capacity: usize,

    /// Bound on records waiting for the consumer.
    #[serde(default = "default_result_queue_capacity")]
    pub result_queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            batch_queue_capacity: DEFAULT_BATCH_QUEUE_CAPACITY,
            result_queue_capacity: DEFAULT_RESULT_QUEUE_CAPACITY,
        }
    }
}

impl PipelineConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_batch_queue_capacity(mut self, capacity: usize) -> Self {
        self.batch_queue_capacity = capacity;
        self
    }

    pub fn with_result_queue_capacity(mut self, capacity: usize) -> Self {
        self.result_queue_capacity = capacity;
        self
    }

    /// Worker count after falling back to the host's parallelism.
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkers { workers: 0 });
        }

        if self.batch_queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity {
                queue: "batch",
                capacity: self.batch_queue_capacity,
            });
        }

        if self.result_queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity {
                queue: "result",
                capacity: self.result_queue_capacity,
            });
        }

        Ok(())
    }
}

fn default_batch_queue_capacity() -> usize {
    DEFAULT_BATCH_QUEUE_CAPACITY
}

fn default_result_queue_capacity() -> usize {
    DEFAULT_RESULT_QUEUE_CAPACITY
}
