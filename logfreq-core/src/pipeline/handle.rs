use crate::analysis::ResultRecord;
use crate::pipeline::error::PipelineError;
use crate::pipeline::producer::ProducerOutcome;
use crate::pipeline::workers::WorkerStats;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub lines_read: u64,
    pub lines_dropped: u64,
    pub batches: u64,
    pub batches_aggregated: u64,
    pub lines_skipped: u64,
    pub records_delivered: u64,
}

/// Pull side of the result queue. The caller is its only consumer.
pub struct ResultStream {
    records: mpsc::Receiver<ResultRecord>,
    producer: JoinHandle<ProducerOutcome>,
    coordinator: JoinHandle<WorkerStats>,
    delivered: u64,
}

impl ResultStream {
    pub(crate) fn new(
        records: mpsc::Receiver<ResultRecord>,
        producer: JoinHandle<ProducerOutcome>,
        coordinator: JoinHandle<WorkerStats>,
    ) -> Self {
        Self {
            records,
            producer,
            coordinator,
            delivered: 0,
        }
    }

    /// Next record, or `None` once every worker has exited and the queue is drained.
    pub async fn next(&mut self) -> Option<ResultRecord> {
        let record = self.records.recv().await?;
        self.delivered += 1;
        Some(record)
    }

    /// Drain every remaining record.
    pub async fn collect(&mut self) -> Vec<ResultRecord> {
        let mut out = Vec::new();
        while let Some(record) = self.next().await {
            out.push(record);
        }
        out
    }

    /// Records currently waiting in the result queue.
    pub fn queued(&self) -> usize {
        self.records.len()
    }

    /// Wait for the producer and the workers and report what they did.
    ///
    /// Records not yet pulled are discarded. An input read failure surfaces here
    /// as [`PipelineError::Read`], after the workers have finished.
    pub async fn finish(mut self) -> Result<PipelineSummary, PipelineError> {
        self.records.close();
        while self.records.recv().await.is_some() {}

        let produced = self
            .producer
            .await
            .map_err(|source| PipelineError::Task {
                task: "producer",
                source,
            })?;

        let workers = self
            .coordinator
            .await
            .map_err(|source| PipelineError::Task {
                task: "coordinator",
                source,
            })?;

        if let Some(e) = produced.read_error {
            return Err(PipelineError::Read(e));
        }

        let batcher = produced.stats;
        Ok(PipelineSummary {
            lines_read: batcher.lines_read,
            lines_dropped: batcher.lines_dropped,
            batches: batcher.batches,
            batches_aggregated: workers.batches,
            lines_skipped: workers.skipped_lines,
            records_delivered: self.delivered,
        })
    }
}
