use crate::conf::{
    ConfigError, DEFAULT_BATCH_QUEUE_CAPACITY, DEFAULT_RESULT_QUEUE_CAPACITY, PipelineConfig,
    load_config,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn load_config_reads_pipeline_block() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logfreq.hcl");
    fs::write(
        &path,
        r#"
pipeline {
  workers               = 3
  batch_queue_capacity  = 8
  result_queue_capacity = 16
}
"#,
    )
    .unwrap();

    // Act
    let cfg = load_config(&path).unwrap();

    // Assert
    assert_eq!(
        cfg.pipeline,
        PipelineConfig {
            workers: Some(3),
            batch_queue_capacity: 8,
            result_queue_capacity: 16,
        }
    );
}

#[test]
fn missing_attributes_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logfreq.hcl");
    fs::write(&path, "pipeline {\n  workers = 2\n}\n").unwrap();

    let cfg = load_config(&path).unwrap();

    assert_eq!(cfg.pipeline.workers, Some(2));
    assert_eq!(
        cfg.pipeline.batch_queue_capacity,
        DEFAULT_BATCH_QUEUE_CAPACITY
    );
    assert_eq!(
        cfg.pipeline.result_queue_capacity,
        DEFAULT_RESULT_QUEUE_CAPACITY
    );
}

#[test]
fn empty_file_is_all_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logfreq.hcl");
    fs::write(&path, "").unwrap();

    let cfg = load_config(&path).unwrap();

    assert_eq!(cfg.pipeline, PipelineConfig::default());
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempdir().unwrap();

    let result = load_config(&dir.path().join("nope.hcl"));

    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn unknown_attribute_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logfreq.hcl");
    fs::write(&path, "pipeline {\n  threads = 2\n}\n").unwrap();

    let result = load_config(&path);

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn zero_workers_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logfreq.hcl");
    fs::write(&path, "pipeline {\n  workers = 0\n}\n").unwrap();

    let result = load_config(&path);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidWorkers { workers: 0 })
    ));
}

#[test]
fn zero_capacity_is_rejected() {
    let batch = PipelineConfig::default().with_batch_queue_capacity(0);
    let result = PipelineConfig::default().with_result_queue_capacity(0);

    assert!(matches!(
        batch.validate(),
        Err(ConfigError::InvalidQueueCapacity { queue: "batch", .. })
    ));
    assert!(matches!(
        result.validate(),
        Err(ConfigError::InvalidQueueCapacity { queue: "result", .. })
    ));
}

#[test]
fn resolved_workers_defaults_to_parallelism() {
    let cfg = PipelineConfig::default();

    assert!(cfg.resolved_workers() >= 1);
    assert_eq!(cfg.clone().with_workers(7).resolved_workers(), 7);
}
