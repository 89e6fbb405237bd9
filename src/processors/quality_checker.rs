use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use validator::Validate;

use crate::models::Transaction;
use crate::processors::geo_classifier::ClassificationSummary;

#[derive(Debug, Clone, Default, Serialize)]
pub struct QualityReport {
    pub raw_rows: usize,
    pub output_rows: usize,
    pub dropped_negative_lease: usize,
    pub classification: ClassificationSummary,
    pub records_per_region: BTreeMap<String, usize>,
    pub records_per_year: BTreeMap<i32, usize>,
    pub violation_counts: BTreeMap<ViolationType, usize>,
    /// First violations found, capped by the checker
    pub violations: Vec<QualityViolation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityViolation {
    pub row_id: u64,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ViolationType {
    NonPositiveSpan,
    InvalidField,
}

impl QualityReport {
    pub fn total_violations(&self) -> usize {
        self.violation_counts.values().sum()
    }
}

/// Audits the enriched table. Findings are reported, never fixed or dropped.
pub struct QualityChecker {
    max_reported: usize,
}

impl QualityChecker {
    pub fn new() -> Self {
        Self { max_reported: 20 }
    }

    pub fn with_max_reported(max_reported: usize) -> Self {
        Self { max_reported }
    }

    pub fn check(
        &self,
        records: &[Transaction],
        raw_rows: usize,
        dropped_negative_lease: usize,
        classification: ClassificationSummary,
    ) -> QualityReport {
        let mut report = QualityReport {
            raw_rows,
            output_rows: records.len(),
            dropped_negative_lease,
            classification,
            ..QualityReport::default()
        };

        for record in records {
            let region = record
                .region
                .map(|r| r.to_string())
                .unwrap_or_else(|| "Unmapped".to_string());
            *report.records_per_region.entry(region).or_default() += 1;
            *report.records_per_year.entry(record.year).or_default() += 1;

            if record.storey_count <= 0 {
                self.record_violation(
                    &mut report,
                    record.row_id,
                    ViolationType::NonPositiveSpan,
                    format!(
                        "storey range '{}' spans {} floors",
                        record.storey_range, record.storey_count
                    ),
                );
            }

            if let Err(e) = record.validate() {
                self.record_violation(
                    &mut report,
                    record.row_id,
                    ViolationType::InvalidField,
                    e.to_string(),
                );
            }
        }

        report
    }

    fn record_violation(
        &self,
        report: &mut QualityReport,
        row_id: u64,
        violation_type: ViolationType,
        details: String,
    ) {
        *report.violation_counts.entry(violation_type).or_default() += 1;
        if report.violations.len() < self.max_reported {
            report.violations.push(QualityViolation {
                row_id,
                violation_type,
                details,
            });
        }
    }

    /// Generate a human readable summary
    pub fn generate_summary(&self, report: &QualityReport) -> String {
        let mut summary = String::new();
        let pct = |n: usize| {
            if report.raw_rows == 0 {
                0.0
            } else {
                100.0 * n as f64 / report.raw_rows as f64
            }
        };

        let _ = writeln!(summary, "=== Data Quality Report ===");
        let _ = writeln!(summary, "Raw Rows: {}", report.raw_rows);
        let _ = writeln!(
            summary,
            "Output Rows: {} ({:.1}%)",
            report.output_rows,
            pct(report.output_rows)
        );
        let _ = writeln!(
            summary,
            "Dropped (negative lease age): {} ({:.2}%)",
            report.dropped_negative_lease,
            pct(report.dropped_negative_lease)
        );

        let _ = writeln!(summary, "\nRecords per Region:");
        for (region, count) in &report.records_per_region {
            let _ = writeln!(summary, "  {}: {}", region, count);
        }

        if !report.classification.refined.is_empty() {
            let _ = writeln!(summary, "\nRefined Planning Areas:");
            for (area, count) in &report.classification.refined {
                let _ = writeln!(summary, "  {}: {}", area, count);
            }
            let _ = writeln!(
                summary,
                "  (block overrides: {})",
                report.classification.block_overrides
            );
        }

        if !report.classification.unmapped_towns.is_empty() {
            let _ = writeln!(summary, "\nUnmapped Towns:");
            for (town, count) in &report.classification.unmapped_towns {
                let _ = writeln!(summary, "  {}: {}", town, count);
            }
        }

        let _ = writeln!(summary, "\nViolations: {}", report.total_violations());
        if !report.violations.is_empty() {
            let _ = writeln!(summary, "\nFirst {} Violations:", report.violations.len());
            for (i, violation) in report.violations.iter().enumerate() {
                let _ = writeln!(
                    summary,
                    "  {}. Row {} ({:?}): {}",
                    i + 1,
                    violation.row_id,
                    violation.violation_type,
                    violation.details
                );
            }
        }

        summary
    }
}

impl Default for QualityChecker {
    fn default() -> Self {
        Self::new()
    }
}
