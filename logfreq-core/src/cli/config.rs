use crate::conf::{LogfreqConfig, load_config};
use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config file
        #[arg(default_value = "logfreq.hcl")]
        path: PathBuf,
    },

    /// Print resolved configuration
    Dump {
        /// Path to config file, built-in defaults when omitted
        path: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Dump { path, json } => dump(path, json),
    }
}

pub fn check(path: PathBuf) -> Result<()> {
    let cfg = load_config(&path)?;

    println!("✔ Config loaded successfully");
    println!("✔ {} workers", cfg.pipeline.resolved_workers());
    println!(
        "✔ batch queue capacity {}",
        cfg.pipeline.batch_queue_capacity
    );
    println!(
        "✔ result queue capacity {}",
        cfg.pipeline.result_queue_capacity
    );

    Ok(())
}

pub fn dump(path: Option<PathBuf>, json: bool) -> Result<()> {
    let s = render(&resolved(path)?, json)?;
    println!("{s}");
    Ok(())
}

/// Config with the worker count filled in.
pub fn resolved(path: Option<PathBuf>) -> Result<LogfreqConfig> {
    let mut cfg = match path {
        Some(path) => load_config(&path)?,
        None => LogfreqConfig::default(),
    };

    let workers = cfg.pipeline.resolved_workers();
    cfg.pipeline.workers = Some(workers);

    Ok(cfg)
}

pub fn render<T: Serialize>(value: &T, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(hcl::to_string(value)?)
    }
}
