mod aggregate_tests;
mod entry_tests;
