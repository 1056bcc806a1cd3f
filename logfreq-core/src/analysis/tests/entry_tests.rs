use crate::analysis::{ParseError, parse_line, parse_timestamp};
use chrono::{DateTime, Timelike};
use pretty_assertions::assert_eq;

#[test]
fn parse_line_decodes_three_fields() {
    // Arrange
    let input = "2019-04-30T12:01:39+02:00,network.go,Network connection established";

    // Act
    let entry = parse_line(input).unwrap();

    // Assert
    assert_eq!(
        entry.timestamp,
        DateTime::parse_from_rfc3339("2019-04-30T12:01:39+02:00").unwrap()
    );
    assert_eq!(entry.source, "network.go");
    assert_eq!(entry.message, "Network connection established");
}

#[test]
fn parse_line_keeps_commas_in_message() {
    let entry = parse_line("2019-04-30T13:01:41+02:00,hal9000.go,I'm sorry, Dave, I'm afraid").unwrap();

    assert_eq!(entry.source, "hal9000.go");
    assert_eq!(entry.message, "I'm sorry, Dave, I'm afraid");
}

#[test]
fn parse_line_accepts_empty_message() {
    let entry = parse_line("2019-04-30T12:00:00Z,main.go,").unwrap();

    assert_eq!(entry.source, "main.go");
    assert_eq!(entry.message, "");
}

#[test]
fn parse_line_rejects_two_fields() {
    let result = parse_line("2019-04-30T12:01:39+02:00,network.go");

    assert!(matches!(result, Err(ParseError::MalformedRecord { .. })));
}

#[test]
fn parse_line_rejects_bad_timestamp() {
    let result = parse_line("yesterday,network.go,Network connection established");

    match result {
        Err(ParseError::InvalidTimestamp { field, .. }) => assert_eq!(field, "yesterday"),
        other => panic!("expected InvalidTimestamp, got {other:?}"),
    }
}

#[test]
fn parse_line_requires_explicit_offset() {
    let result = parse_line("2019-04-30T12:01:39,network.go,Network connection established");

    assert!(matches!(result, Err(ParseError::InvalidTimestamp { .. })));
}

#[test]
fn parse_timestamp_reads_only_leading_field() {
    // The rest of the line is not validated here.
    let ts = parse_timestamp("2019-04-30T23:59:00-05:00,only-source").unwrap();

    assert_eq!(ts.hour(), 23);
}

#[test]
fn parse_timestamp_uses_whole_line_without_comma() {
    assert!(parse_timestamp("2019-04-30T23:59:00Z").is_ok());
    assert!(parse_timestamp("not a timestamp").is_err());
    assert!(parse_timestamp("").is_err());
}
