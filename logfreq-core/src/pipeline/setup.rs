use crate::conf::PipelineConfig;
use crate::pipeline::error::PipelineError;
use crate::pipeline::handle::ResultStream;
use crate::pipeline::producer::spawn_producer;
use crate::pipeline::workers::WorkerPool;
use tokio::io::AsyncBufRead;
use tokio::sync::mpsc;

/// A validated pipeline, ready to run over any number of inputs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    workers: usize,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let workers = config.resolved_workers();

        Ok(Self { config, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Wire producer, workers and coordinator, and hand back the result queue.
    ///
    /// Must be called from within a Tokio runtime. The run cannot be cancelled;
    /// closing `reader` early flushes what was buffered as a final batch.
    pub fn start<R>(&self, reader: R) -> ResultStream
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (batch_tx, batch_rx) = mpsc::channel(self.config.batch_queue_capacity);
        let (result_tx, result_rx) = mpsc::channel(self.config.result_queue_capacity);

        let coordinator = WorkerPool::new(self.workers).spawn(batch_rx, result_tx);
        let producer = spawn_producer(reader, batch_tx);

        tracing::info!(
            workers = self.workers,
            batch_queue_capacity = self.config.batch_queue_capacity,
            result_queue_capacity = self.config.result_queue_capacity,
            "pipeline started"
        );

        ResultStream::new(result_rx, producer, coordinator)
    }
}
