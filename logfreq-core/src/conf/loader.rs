use crate::conf::error::ConfigError;
use crate::conf::types::LogfreqConfig;
use std::fs;
use std::path::Path;

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> Result<LogfreqConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let cfg = parse_config(&contents).map_err(|e| ConfigError::parse(path, e))?;
    cfg.pipeline.validate()?;

    Ok(cfg)
}

pub(crate) fn parse_config(contents: &str) -> Result<LogfreqConfig, hcl::Error> {
    hcl::from_str(contents)
}
