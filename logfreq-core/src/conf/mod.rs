mod error;
mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use error::ConfigError;
pub use loader::load_config;
pub use types::{
    DEFAULT_BATCH_QUEUE_CAPACITY, DEFAULT_RESULT_QUEUE_CAPACITY, LogfreqConfig, PipelineConfig,
};
