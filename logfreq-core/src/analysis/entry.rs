use chrono::{DateTime, FixedOffset};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed record, expected <timestamp>,<source>,<message>: {line}")]
    MalformedRecord { line: String },

    #[error("invalid timestamp '{field}': {source}")]
    InvalidTimestamp {
        field: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// One decoded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub timestamp: DateTime<FixedOffset>,
    pub source: String,
    pub message: String,
}

/// Decode `<rfc3339>,<source>,<message>`.
///
/// Only the first two commas are structural, so the message keeps any commas
/// of its own.
pub fn parse_line(line: &str) -> Result<Entry, ParseError> {
    let mut fields = line.splitn(3, ',');

    let (Some(ts), Some(source), Some(message)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::MalformedRecord {
            line: line.to_string(),
        });
    };

    Ok(Entry {
        timestamp: parse_rfc3339(ts)?,
        source: source.to_string(),
        message: message.to_string(),
    })
}

/// Parse only the leading timestamp field of a raw line.
///
/// The field runs up to the first comma, or is the whole line when there is none.
pub fn parse_timestamp(line: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let field = line.split(',').next().unwrap_or(line);
    parse_rfc3339(field)
}

fn parse_rfc3339(field: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_rfc3339(field).map_err(|source| ParseError::InvalidTimestamp {
        field: field.to_string(),
        source,
    })
}
