pub mod analysis;
pub mod cli;
pub mod conf;
pub mod logging;
pub mod pipeline;
pub mod sink;
