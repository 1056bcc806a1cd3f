use crate::analysis::{Batch, ResultRecord, tally};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::{JoinHandle, JoinSet};

/// Every worker dequeues from the same receiver.
type SharedBatches = Arc<Mutex<mpsc::Receiver<Batch>>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub batches: u64,
    pub skipped_lines: u64,
}

impl WorkerStats {
    fn merge(&mut self, other: WorkerStats) {
        self.batches += other.batches;
        self.skipped_lines += other.skipped_lines;
    }
}

/// Fixed-size pool of aggregation workers.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Start the workers plus the coordinator that closes the result queue.
    ///
    /// The returned handle resolves once every worker has exited and the result
    /// queue has been closed. Records carry no ordering across batches.
    pub fn spawn(
        self,
        batches: mpsc::Receiver<Batch>,
        results: mpsc::Sender<ResultRecord>,
    ) -> JoinHandle<WorkerStats> {
        let batches: SharedBatches = Arc::new(Mutex::new(batches));

        let mut set = JoinSet::new();
        for id in 0..self.workers {
            set.spawn(run_worker(id, batches.clone(), results.clone()));
        }

        tokio::spawn(async move {
            let mut total = WorkerStats::default();

            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok(stats) => total.merge(stats),
                    Err(e) => tracing::error!(error = %e, "worker task failed"),
                }
            }

            // Workers dropped their senders on exit; this is the last one.
            drop(results);
            tracing::debug!(
                batches = total.batches,
                skipped_lines = total.skipped_lines,
                "all workers finished, result queue closed"
            );

            total
        })
    }
}

async fn run_worker(
    id: usize,
    batches: SharedBatches,
    results: mpsc::Sender<ResultRecord>,
) -> WorkerStats {
    let mut stats = WorkerStats::default();

    loop {
        let next = batches.lock().await.recv().await;
        let Some(batch) = next else {
            break;
        };

        let tally = tally(&batch);
        stats.batches += 1;
        stats.skipped_lines += tally.skipped as u64;

        tracing::debug!(
            worker = id,
            seq = batch.seq(),
            hour = batch.hour(),
            entries = tally.entries,
            max_count = tally.max_count,
            "batch aggregated"
        );

        if results.send(tally.record).await.is_err() {
            tracing::warn!(worker = id, "result queue dropped by consumer, stopping worker");
            break;
        }
    }

    stats
}
