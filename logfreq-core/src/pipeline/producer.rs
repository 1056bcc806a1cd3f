use crate::analysis::{Batch, BatcherStats, HourBatcher};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What the producer task hands back: its counters, plus the read error that
/// cut the input short, if any.
#[derive(Debug)]
pub struct ProducerOutcome {
    pub stats: BatcherStats,
    pub read_error: Option<io::Error>,
}

/// Run the batcher over `reader` on its own task.
///
/// The batch queue closes when the task returns, which is how workers learn that
/// no more batches will arrive.
pub fn spawn_producer<R>(reader: R, batches: mpsc::Sender<Batch>) -> JoinHandle<ProducerOutcome>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(produce(reader, batches))
}

async fn produce<R>(mut reader: R, batches: mpsc::Sender<Batch>) -> ProducerOutcome
where
    R: AsyncBufRead + Unpin,
{
    let mut batcher = HourBatcher::new();
    let mut buf = Vec::new();
    let mut read_error = None;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                // Stop reading; whatever is buffered still flushes.
                tracing::error!(error = %e, "failed to read input, stopping");
                read_error = Some(e);
                break;
            }
        }

        let line = decode_line(&buf);

        if let Some(batch) = batcher.push(line) {
            if batches.send(batch).await.is_err() {
                tracing::warn!("batch queue has no workers left, stopping producer");
                return ProducerOutcome {
                    stats: batcher.stats(),
                    read_error,
                };
            }
        }
    }

    if let Some(batch) = batcher.finish() {
        if batches.send(batch).await.is_err() {
            tracing::warn!("batch queue has no workers left, final batch discarded");
        }
    }

    let stats = batcher.stats();
    tracing::debug!(
        lines_read = stats.lines_read,
        lines_dropped = stats.lines_dropped,
        batches = stats.batches,
        "input exhausted, closing batch queue"
    );

    ProducerOutcome { stats, read_error }
}

/// Strip the line terminator and decode, replacing bytes that are not UTF-8.
pub(crate) fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

    match String::from_utf8(raw.to_vec()) {
        Ok(line) => line,
        Err(e) => {
            let line = String::from_utf8_lossy(e.as_bytes()).into_owned();
            tracing::debug!(line = %line, "replaced invalid UTF-8 in input line");
            line
        }
    }
}
