use crate::analysis::ResultRecord;
use crate::pipeline::ResultStream;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write record: {0}")]
    Write(#[from] std::io::Error),
}

/// Write records one per line in delivery order. Returns how many were written.
///
/// The first write failure ends the run.
pub async fn write_records<W>(records: &mut ResultStream, out: &mut W) -> Result<u64, SinkError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut written = 0;
    while let Some(record) = records.next().await {
        write_record(out, &record).await?;
        written += 1;
    }
    out.flush().await?;

    Ok(written)
}

/// Buffer every record, order them by date-hour, then write.
pub async fn write_sorted<W>(records: &mut ResultStream, out: &mut W) -> Result<u64, SinkError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut all = records.collect().await;
    sort_chronologically(&mut all);

    for record in &all {
        write_record(out, record).await?;
    }
    out.flush().await?;

    Ok(all.len() as u64)
}

/// Stable: records sharing a date-hour keep their delivery order.
pub fn sort_chronologically(records: &mut [ResultRecord]) {
    records.sort_by_key(|r| r.date_hour);
}

async fn write_record<W>(out: &mut W, record: &ResultRecord) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let line = format!("{record}\n");
    out.write_all(line.as_bytes()).await
}
