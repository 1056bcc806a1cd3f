use crate::analysis::entry::parse_timestamp;
use chrono::Timelike;

/// A contiguous run of raw lines that share one hour-of-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    seq: u64,
    hour: u32,
    lines: Vec<String>,
}

impl Batch {
    pub fn new(seq: u64, hour: u32, lines: Vec<String>) -> Self {
        Self { seq, hour, lines }
    }

    /// Position of this batch in the order the batcher closed it.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Hour-of-day (0-23) in the offset of the lines themselves.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Counters kept while batching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatcherStats {
    pub lines_read: u64,
    pub lines_dropped: u64,
    pub batches: u64,
}

/// Groups an ordered line stream into hour-of-day batches.
///
/// Batching reacts to immediate hour transitions only. Two runs of the same hour
/// separated by another hour stay separate batches. Lines are never reordered
/// and the batcher never looks ahead.
#[derive(Debug, Default)]
pub struct HourBatcher {
    current: Vec<String>,
    last_hour: Option<u32>,
    stats: BatcherStats,
}

impl HourBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line. Returns the batch that the line closed, if any.
    ///
    /// Lines whose leading timestamp does not parse are logged and dropped
    /// without touching the current hour.
    pub fn push(&mut self, line: String) -> Option<Batch> {
        self.stats.lines_read += 1;

        let entry_hour = match parse_timestamp(&line) {
            Ok(ts) => ts.hour(),
            Err(e) => {
                self.stats.lines_dropped += 1;
                tracing::warn!(error = %e, line = %line, "dropping line with unparseable timestamp");
                return None;
            }
        };

        let closed = match self.last_hour {
            Some(last) if last != entry_hour => self.close(last),
            _ => None,
        };

        self.current.push(line);
        self.last_hour = Some(entry_hour);

        closed
    }

    /// Flush the trailing partial batch at end of input.
    pub fn finish(&mut self) -> Option<Batch> {
        let hour = self.last_hour?;
        let batch = self.close(hour);
        self.last_hour = None;
        batch
    }

    pub fn stats(&self) -> BatcherStats {
        self.stats
    }

    fn close(&mut self, hour: u32) -> Option<Batch> {
        if self.current.is_empty() {
            return None;
        }

        let lines = std::mem::take(&mut self.current);
        let batch = Batch::new(self.stats.batches, hour, lines);
        self.stats.batches += 1;

        tracing::debug!(
            seq = batch.seq(),
            hour = batch.hour(),
            lines = batch.len(),
            "batch closed"
        );

        Some(batch)
    }
}

/// Lazy iterator of batches over an ordered line source.
pub struct HourBatches<I> {
    lines: I,
    batcher: HourBatcher,
    done: bool,
}

impl<I> HourBatches<I> {
    pub fn stats(&self) -> BatcherStats {
        self.batcher.stats()
    }
}

impl<I> Iterator for HourBatches<I>
where
    I: Iterator<Item = String>,
{
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.done {
            return None;
        }

        for line in self.lines.by_ref() {
            if let Some(batch) = self.batcher.push(line) {
                return Some(batch);
            }
        }

        self.done = true;
        self.batcher.finish()
    }
}

pub fn hour_batches<I>(lines: I) -> HourBatches<I::IntoIter>
where
    I: IntoIterator<Item = String>,
{
    HourBatches {
        lines: lines.into_iter(),
        batcher: HourBatcher::new(),
        done: false,
    }
}
