use crate::conf::{PipelineConfig, load_config};
use crate::pipeline::{Pipeline, PipelineSummary};
use crate::sink::{write_records, write_sorted};
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, BufWriter};

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Log file to analyze, `-` reads stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Write records to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Sort records by date and hour before writing
    #[arg(long)]
    pub sort: bool,

    /// Path to an HCL pipeline config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of aggregation workers
    #[arg(long)]
    pub workers: Option<usize>,

    /// Capacity of the batch queue
    #[arg(long)]
    pub batch_queue: Option<usize>,

    /// Capacity of the result queue
    #[arg(long)]
    pub result_queue: Option<usize>,
}

impl AnalyzeArgs {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            sort: false,
            config: None,
            workers: None,
            batch_queue: None,
            result_queue: None,
        }
    }
}

pub async fn run(args: AnalyzeArgs) -> Result<PipelineSummary> {
    let config = resolve_config(&args)?;
    let pipeline = Pipeline::new(config)?;

    let input = open_input(&args.input).await?;
    let mut output = open_output(args.output.as_deref()).await?;

    let mut records = pipeline.start(input);

    let written = if args.sort {
        write_sorted(&mut records, &mut output).await
    } else {
        write_records(&mut records, &mut output).await
    };
    let written = written.context("failed to write records")?;

    let summary = records.finish().await?;

    tracing::info!(
        lines_read = summary.lines_read,
        lines_dropped = summary.lines_dropped,
        lines_skipped = summary.lines_skipped,
        batches = summary.batches,
        records = written,
        "analysis complete"
    );

    Ok(summary)
}

/// File values first, then command-line overrides.
pub fn resolve_config(args: &AnalyzeArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?.pipeline,
        None => PipelineConfig::default(),
    };

    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if let Some(capacity) = args.batch_queue {
        config = config.with_batch_queue_capacity(capacity);
    }
    if let Some(capacity) = args.result_queue {
        config = config.with_result_queue_capacity(capacity);
    }

    Ok(config)
}

async fn open_input(path: &Path) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }

    let file = File::open(path)
        .await
        .with_context(|| format!("failed to open input {}", path.display()))?;

    Ok(Box::new(BufReader::new(file)))
}

async fn open_output(path: Option<&Path>) -> Result<Box<dyn AsyncWrite + Unpin + Send>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(tokio::io::stdout())));
    };

    let file = File::create(path)
        .await
        .with_context(|| format!("failed to create output {}", path.display()))?;

    Ok(Box::new(BufWriter::new(file)))
}
