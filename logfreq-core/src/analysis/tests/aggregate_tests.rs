use crate::analysis::tests::test_helpers::{MEME, at_hour, batch_of, four_line_batch, line};
use crate::analysis::{DateHour, ResultRecord, summarize, tally};
use chrono::DateTime;
use pretty_assertions::assert_eq;

#[test]
fn most_frequent_pair_wins() {
    // Act
    let record = summarize(&four_line_batch());

    // Assert
    assert_eq!(
        record.to_string(),
        format!("04302019,12,memeGenerator.go,{MEME}")
    );
}

#[test]
fn summarize_is_repeatable() {
    let batch = four_line_batch();

    assert_eq!(summarize(&batch), summarize(&batch));
}

#[test]
fn all_unique_pairs_pick_first_entry() {
    // Arrange
    let batch = batch_of(&[
        at_hour(12, 1, "a.go", "one"),
        at_hour(12, 2, "b.go", "two"),
        at_hour(12, 3, "c.go", "three"),
    ]);

    // Act
    let record = summarize(&batch);

    // Assert
    assert_eq!(record.source, "a.go");
    assert_eq!(record.message, "one");
}

#[test]
fn tie_keeps_first_pair_to_reach_the_count() {
    // b reaches 2 first; a only ties it afterwards.
    let batch = batch_of(&[
        at_hour(12, 1, "a.go", "x"),
        at_hour(12, 2, "b.go", "y"),
        at_hour(12, 3, "b.go", "y"),
        at_hour(12, 4, "a.go", "x"),
    ]);

    let record = summarize(&batch);

    assert_eq!(record.source, "b.go");
}

#[test]
fn interleaved_tie_goes_to_earliest() {
    let batch = batch_of(&[
        at_hour(12, 1, "a.go", "x"),
        at_hour(12, 2, "b.go", "y"),
        at_hour(12, 3, "a.go", "x"),
        at_hour(12, 4, "b.go", "y"),
    ]);

    let t = tally(&batch);

    assert_eq!(t.record.source, "a.go");
    assert_eq!(t.max_count, 2);
}

#[test]
fn same_source_different_message_are_distinct_keys() {
    let batch = batch_of(&[
        at_hour(12, 1, "db.go", "Transaction failed"),
        at_hour(12, 2, "db.go", "Error: Failed to connect to database"),
        at_hour(12, 3, "cache.go", "Cache created"),
        at_hour(12, 4, "cache.go", "Cache created"),
    ]);

    let record = summarize(&batch);

    assert_eq!(record.source, "cache.go");
    assert_eq!(record.message, "Cache created");
}

#[test]
fn date_hour_comes_from_entry_that_last_raised_the_max() {
    // Both lines are hour 12 so they share a batch, but on different days.
    let batch = batch_of(&[
        line("2019-04-30T12:10:00+02:00", "a.go", "x"),
        line("2019-05-01T12:05:00+02:00", "b.go", "y"),
        line("2019-05-01T12:06:00+02:00", "b.go", "y"),
        line("2019-05-02T12:07:00+02:00", "a.go", "x"),
    ]);

    let record = summarize(&batch);

    assert_eq!(record.to_string(), "05012019,12,b.go,y");
}

#[test]
fn date_hour_uses_the_entrys_local_time() {
    // 23:30 at -05:00 is already the next day in UTC.
    let batch = batch_of(&[line("2019-04-30T23:30:00-05:00", "a.go", "x")]);

    let record = summarize(&batch);

    assert_eq!(record.date_hour.to_string(), "04302019,23");
    assert_eq!(
        (
            record.date_hour.year(),
            record.date_hour.month(),
            record.date_hour.day(),
            record.date_hour.hour()
        ),
        (2019, 4, 30, 23)
    );
}

#[test]
fn bad_lines_are_skipped_not_fatal() {
    // Arrange
    let batch = batch_of(&[
        "2019-04-30T12:00:00+02:00,only-source".to_string(),
        at_hour(12, 1, "a.go", "x"),
        "2019-04-30T12:02:00+02:00,a.go".to_string(),
    ]);

    // Act
    let t = tally(&batch);

    // Assert
    assert_eq!(t.entries, 1);
    assert_eq!(t.skipped, 2);
    assert_eq!(t.record.source, "a.go");
}

#[test]
fn batch_without_parseable_entries_yields_zero_record() {
    let batch = batch_of(&["2019-04-30T12:00:00+02:00,only-source".to_string()]);

    let record = summarize(&batch);

    assert_eq!(
        record,
        ResultRecord {
            date_hour: DateHour::ZERO,
            source: String::new(),
            message: String::new(),
        }
    );
    assert_eq!(record.to_string(), "01010001,00,,");
}

#[test]
fn message_commas_survive_into_record() {
    let batch = batch_of(&[at_hour(13, 1, "hal9000.go", "I'm sorry, Dave")]);

    assert_eq!(
        summarize(&batch).to_string(),
        "04302019,13,hal9000.go,I'm sorry, Dave"
    );
}

#[test]
fn date_hour_orders_chronologically() {
    let parse = |s: &str| DateHour::from_timestamp(&DateTime::parse_from_rfc3339(s).unwrap());

    let mut hours = vec![
        parse("2020-01-01T00:00:00Z"),
        parse("2019-12-31T23:00:00Z"),
        parse("2019-04-30T13:00:00Z"),
        parse("2019-04-30T12:00:00Z"),
    ];
    hours.sort();

    let rendered: Vec<String> = hours.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["04302019,12", "04302019,13", "12312019,23", "01012020,00"]
    );
    assert!(DateHour::ZERO < hours[0]);
}
