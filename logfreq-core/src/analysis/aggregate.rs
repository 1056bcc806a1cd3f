use crate::analysis::batcher::Batch;
use crate::analysis::entry::parse_line;
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Calendar hour bucket of a record, in the local time of the entry it came from.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateHour {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
}

impl DateHour {
    /// The zero instant (0001-01-01 00h), used when a batch has no parseable entry.
    pub const ZERO: DateHour = DateHour {
        year: 1,
        month: 1,
        day: 1,
        hour: 0,
    };

    pub fn from_timestamp(ts: &DateTime<FixedOffset>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
            day: ts.day(),
            hour: ts.hour(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }
}

impl Display for DateHour {
    /// `MMDDYYYY,HH`
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}{:02}{:04},{:02}",
            self.month, self.day, self.year, self.hour
        )
    }
}

/// The (source, message) pair that is the unit of counting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrequencyKey {
    pub source: String,
    pub message: String,
}

/// Summary row for one batch: its most frequent pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub date_hour: DateHour,
    pub source: String,
    pub message: String,
}

impl Display for ResultRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.date_hour, self.source, self.message)
    }
}

/// Outcome of counting one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub record: ResultRecord,
    pub entries: usize,
    pub skipped: usize,
    pub max_count: usize,
}

/// Count a batch and pick its winner.
///
/// The running maximum only moves on a strictly greater count, so on a tie the
/// pair that reached the count first keeps it. The record's date-hour comes from
/// the entry that made the last such move.
pub fn tally(batch: &Batch) -> Tally {
    let mut counts: HashMap<FrequencyKey, usize> = HashMap::new();
    let mut max_count = 0;
    let mut winner: Option<(FrequencyKey, DateTime<FixedOffset>)> = None;
    let mut entries = 0;
    let mut skipped = 0;

    for line in batch.lines() {
        let entry = match parse_line(line) {
            Ok(entry) => entry,
            Err(e) => {
                skipped += 1;
                tracing::warn!(seq = batch.seq(), error = %e, "skipping unparseable line in batch");
                continue;
            }
        };
        entries += 1;

        let key = FrequencyKey {
            source: entry.source,
            message: entry.message,
        };

        let count = counts.entry(key.clone()).or_insert(0);
        *count += 1;

        if *count > max_count {
            max_count = *count;
            winner = Some((key, entry.timestamp));
        }
    }

    let record = match winner {
        Some((key, ts)) => ResultRecord {
            date_hour: DateHour::from_timestamp(&ts),
            source: key.source,
            message: key.message,
        },
        None => {
            tracing::warn!(
                seq = batch.seq(),
                lines = batch.len(),
                "batch has no parseable entries, emitting zero-value record"
            );
            ResultRecord {
                date_hour: DateHour::ZERO,
                source: String::new(),
                message: String::new(),
            }
        }
    };

    Tally {
        record,
        entries,
        skipped,
        max_count,
    }
}

/// The worker body: one batch in, one record out.
pub fn summarize(batch: &Batch) -> ResultRecord {
    tally(batch).record
}
