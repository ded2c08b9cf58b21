//! # Metrics
//!
//! Prometheus metrics for sync runs.
//!
//! ## Metrics Exposed
//!
//! - `secret_sync_runs_total` - Total number of sync runs
//! - `secret_sync_run_errors_total` - Total number of failed sync runs
//! - `secret_sync_run_duration_seconds` - Duration of sync runs
//! - `secret_sync_changes_total` - Change records produced, by kind
//! - `secret_sync_applies_total` - Change sets applied, by mode
//! - `secret_sync_store_operations_total` - Secret store operations, by provider and operation
//! - `secret_sync_store_operation_duration_seconds` - Duration of secret store operations
//! - `secret_sync_store_operation_errors_total` - Failed secret store operations
//!
//! A CLI run is short-lived, so the registry is written to a textfile
//! (node-exporter textfile collector format) instead of being served.

use anyhow::{Context, Result};
use prometheus::{Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder};
use std::path::Path;
use std::sync::LazyLock;

// Metrics
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static RUNS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new("secret_sync_runs_total", "Total number of sync runs")
        .expect("Failed to create RUNS_TOTAL metric - this should never happen")
});

static RUN_ERRORS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "secret_sync_run_errors_total",
        "Total number of failed sync runs",
    )
    .expect("Failed to create RUN_ERRORS_TOTAL metric - this should never happen")
});

static RUN_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "secret_sync_run_duration_seconds",
            "Duration of sync runs in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
    )
    .expect("Failed to create RUN_DURATION metric - this should never happen")
});

static CHANGES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secret_sync_changes_total",
            "Total number of change records by kind",
        ),
        &["kind"],
    )
    .expect("Failed to create CHANGES_TOTAL metric - this should never happen")
});

static APPLIES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secret_sync_applies_total",
            "Total number of change sets applied by mode",
        ),
        &["mode"],
    )
    .expect("Failed to create APPLIES_TOTAL metric - this should never happen")
});

static STORE_OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secret_sync_store_operations_total",
            "Total number of secret store operations by provider and operation",
        ),
        &["provider", "operation"],
    )
    .expect("Failed to create STORE_OPERATIONS_TOTAL metric - this should never happen")
});

static STORE_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "secret_sync_store_operation_duration_seconds",
            "Duration of secret store operations in seconds by provider",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["provider"],
    )
    .expect("Failed to create STORE_OPERATION_DURATION metric - this should never happen")
});

static STORE_OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "secret_sync_store_operation_errors_total",
            "Total number of secret store operation errors by provider and operation",
        ),
        &["provider", "operation"],
    )
    .expect("Failed to create STORE_OPERATION_ERRORS_TOTAL metric - this should never happen")
});

#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
/// Register all metrics with the registry
///
/// Fails if called twice in the same process.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(RUNS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RUN_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RUN_DURATION.clone()))?;
    REGISTRY.register(Box::new(CHANGES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(APPLIES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(STORE_OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(STORE_OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(STORE_OPERATION_ERRORS_TOTAL.clone()))?;
    Ok(())
}

pub fn increment_runs() {
    RUNS_TOTAL.inc();
}

pub fn increment_run_errors() {
    RUN_ERRORS_TOTAL.inc();
}

pub fn observe_run_duration(duration: f64) {
    RUN_DURATION.observe(duration);
}

/// Add `count` change records of `kind` (added, changed, removed, skipped)
pub fn record_changes(kind: &str, count: usize) {
    CHANGES_TOTAL
        .with_label_values(&[kind])
        .inc_by(u64::try_from(count).unwrap_or(u64::MAX));
}

pub fn increment_applies(mode: &str) {
    APPLIES_TOTAL.with_label_values(&[mode]).inc();
}

/// Record a successful store operation
pub fn record_store_operation(provider: &str, operation: &str, duration: f64) {
    STORE_OPERATIONS_TOTAL
        .with_label_values(&[provider, operation])
        .inc();
    STORE_OPERATION_DURATION
        .with_label_values(&[provider])
        .observe(duration);
}

/// Increment store operation errors counter
pub fn increment_store_operation_errors(provider: &str, operation: &str) {
    STORE_OPERATION_ERRORS_TOTAL
        .with_label_values(&[provider, operation])
        .inc();
}

/// Render the registry in Prometheus text exposition format
pub fn render() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .context("Failed to encode metrics")?;
    String::from_utf8(buffer).context("Metrics output is not valid UTF-8")
}

/// Write the registry to `path` for a textfile collector
///
/// Writes to a sibling temp file and renames, so a collector never reads a
/// half-written file.
pub fn write_to_file(path: &Path) -> Result<()> {
    let rendered = render()?;
    let tmp_path = path.with_extension("prom.tmp");
    std::fs::write(&tmp_path, rendered)
        .with_context(|| format!("Failed to write metrics to {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move metrics file into {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_runs() {
        let before = RUNS_TOTAL.get();
        increment_runs();
        assert_eq!(RUNS_TOTAL.get(), before + 1);
    }

    #[test]
    fn test_increment_run_errors() {
        let before = RUN_ERRORS_TOTAL.get();
        increment_run_errors();
        assert_eq!(RUN_ERRORS_TOTAL.get(), before + 1);
    }

    #[test]
    fn test_observe_run_duration() {
        observe_run_duration(1.5);
        // Just verify it doesn't panic - histogram observation doesn't return a value
    }

    #[test]
    fn test_record_changes() {
        let before = CHANGES_TOTAL.with_label_values(&["added"]).get();
        record_changes("added", 3);
        assert_eq!(CHANGES_TOTAL.with_label_values(&["added"]).get(), before + 3);
    }

    #[test]
    fn test_increment_applies() {
        let before = APPLIES_TOTAL.with_label_values(&["update"]).get();
        increment_applies("update");
        assert_eq!(APPLIES_TOTAL.with_label_values(&["update"]).get(), before + 1);
    }

    #[test]
    fn test_record_store_operation() {
        let before = STORE_OPERATIONS_TOTAL
            .with_label_values(&["aws", "get"])
            .get();
        record_store_operation("aws", "get", 0.3);
        let after = STORE_OPERATIONS_TOTAL
            .with_label_values(&["aws", "get"])
            .get();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_increment_store_operation_errors() {
        let before = STORE_OPERATION_ERRORS_TOTAL
            .with_label_values(&["aws", "update"])
            .get();
        increment_store_operation_errors("aws", "update");
        let after = STORE_OPERATION_ERRORS_TOTAL
            .with_label_values(&["aws", "update"])
            .get();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret_sync.prom");
        write_to_file(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("prom.tmp").exists());
    }
}
