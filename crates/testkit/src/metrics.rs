//! Standardized generation metrics for CI integration.
//!
//! Reports are exported as JSON so regressions in generation time or seam
//! quality can be tracked between runs.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Top-level metrics report.
///
/// This is the format of the `metrics.json` files exported by tests and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Test/run identifier
    pub test_name: String,

    /// Timestamp when metrics were collected (ISO 8601)
    pub timestamp: String,

    /// Overall result
    pub result: TestResult,

    /// Field generation metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationMetrics>,

    /// Execution metrics
    pub test_execution: TestExecutionMetrics,
}

/// Overall test result status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    /// Test passed all validations
    Pass,
    /// Test failed
    Fail,
    /// Nothing to validate (e.g. a single-tile sweep has no seams)
    Skip,
}

/// Field generation performance and quality metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetrics {
    /// Total tiles generated
    pub tiles_generated: usize,

    /// Total cells generated
    pub cells_generated: usize,

    /// Average time per tile in microseconds
    pub avg_gen_time_us: f64,

    /// Fastest tile in microseconds
    pub min_gen_time_us: u128,

    /// Slowest tile in microseconds
    pub max_gen_time_us: u128,

    /// Wall time spent generating, in milliseconds
    pub total_gen_time_ms: f64,

    /// Smallest height observed across all tiles
    pub value_min: f32,

    /// Largest height observed across all tiles
    pub value_max: f32,

    /// Seam validation results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seam_validation: Option<SeamValidation>,
}

/// Seam validation between adjacent tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeamValidation {
    /// Number of shared edges checked
    pub total_seams: usize,

    /// Edges within tolerance
    pub seams_valid: usize,

    /// Edges over tolerance
    pub seams_failed: usize,

    /// Largest edge mismatch
    pub max_seam_diff: f32,

    /// Mean edge mismatch
    pub avg_seam_diff: f64,
}

/// Test execution metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestExecutionMetrics {
    /// Total duration in seconds
    pub duration_seconds: f64,

    /// Number of assertions checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertions_checked: Option<usize>,

    /// Number of validations that passed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validations_passed: Option<usize>,
}

/// Builder for [`MetricsReport`].
pub struct MetricsReportBuilder {
    report: MetricsReport,
}

impl MetricsReportBuilder {
    /// Start a report named `test_name`, stamped with the current time.
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            report: MetricsReport {
                test_name: test_name.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                result: TestResult::Pass,
                generation: None,
                test_execution: TestExecutionMetrics {
                    duration_seconds: 0.0,
                    assertions_checked: None,
                    validations_passed: None,
                },
            },
        }
    }

    /// Set the overall result.
    pub fn result(mut self, result: TestResult) -> Self {
        self.report.result = result;
        self
    }

    /// Attach generation metrics.
    pub fn generation(mut self, metrics: GenerationMetrics) -> Self {
        self.report.generation = Some(metrics);
        self
    }

    /// Attach execution metrics.
    pub fn execution(mut self, metrics: TestExecutionMetrics) -> Self {
        self.report.test_execution = metrics;
        self
    }

    /// Finish the report.
    pub fn build(self) -> MetricsReport {
        self.report
    }
}

/// Writes a [`MetricsReport`] to disk.
pub struct MetricsSink {
    path: std::path::PathBuf,
}

impl MetricsSink {
    /// Create a sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { path })
    }

    /// Write `report` as pretty JSON.
    pub fn write(&self, report: &MetricsReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
