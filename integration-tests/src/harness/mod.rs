pub mod fixtures;
pub mod tracing;

pub use fixtures::{fixture_path, read_lines};
pub use tracing::{CapturedEvent, init_test_tracing};
