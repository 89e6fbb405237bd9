use std::fmt;
use std::time::Instant;
use tracing::{debug, error};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{InflationIndex, Transaction};
use crate::processors::{
    FieldNormalizer, GeoClassifier, InflationAdjuster, QualityChecker, QualityReport,
    StoreyRangeParser,
};
use crate::readers::{CpiReader, TransactionReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::{DatasetWriter, ParquetWriter, WrittenFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Normalize,
    StoreyRange,
    Classify,
    Inflation,
    Quality,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Normalize => "normalize",
            Stage::StoreyRange => "storey-range",
            Stage::Classify => "classify",
            Stage::Inflation => "inflation",
            Stage::Quality => "quality",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Everything the stages produced, before anything is written
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<Transaction>,
    pub index: InflationIndex,
    pub report: QualityReport,
}

/// Runs the cleaning stages in order over the whole table
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load, clean and enrich the table. Nothing is written.
    pub fn run(&self, progress: &ProgressReporter) -> Result<PipelineOutput> {
        let config = &self.config;

        let raw = run_stage(Stage::Load, progress, || {
            TransactionReader::new().read_all(&config.raw_paths())
        })?;

        let normalized = run_stage(Stage::Normalize, progress, || {
            FieldNormalizer::new().normalize(raw)
        })?;
        let raw_rows = normalized.input_rows;
        let dropped = normalized.dropped_negative_lease;
        let mut records = normalized.records;

        run_stage(Stage::StoreyRange, progress, || {
            StoreyRangeParser::new().apply(&mut records)
        })?;

        let classification = run_stage(Stage::Classify, progress, || {
            GeoClassifier::new()
                .with_strict_regions(config.strict_regions)
                .classify(&mut records)
        })?;

        let index = run_stage(Stage::Inflation, progress, || {
            let adjuster = InflationAdjuster::new(config.inflation_settings());
            let table = CpiReader::new().read_table(&config.cpi_file)?;
            let index = adjuster.build_index(&table)?;
            adjuster.apply(&index, &mut records)?;
            Ok(index)
        })?;

        let report = run_stage(Stage::Quality, progress, || {
            Ok(QualityChecker::new().check(&records, raw_rows, dropped, classification))
        })?;

        Ok(PipelineOutput {
            records,
            index,
            report,
        })
    }

    /// Persist the tables and, when configured, the run report
    pub fn write(
        &self,
        output: &PipelineOutput,
        progress: &ProgressReporter,
    ) -> Result<Vec<WrittenFile>> {
        let config = &self.config;

        run_stage(Stage::Write, progress, || {
            let parquet = ParquetWriter::new()
                .with_compression(&config.compression)?
                .with_row_group_size(config.row_group_size);
            DatasetWriter::new(parquet).write_with_report(
                &output.records,
                &config.output_file,
                config.location_file.as_deref(),
                config
                    .report_file
                    .as_deref()
                    .map(|path| (path, &output.report)),
            )
        })
    }

    /// Run every stage, then write
    pub fn process(
        &self,
        progress: &ProgressReporter,
    ) -> Result<(PipelineOutput, Vec<WrittenFile>)> {
        let output = self.run(progress)?;
        let written = self.write(&output, progress)?;
        Ok((output, written))
    }
}

fn run_stage<T>(
    stage: Stage,
    progress: &ProgressReporter,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    progress.set_message(&format!("Running {} stage...", stage));
    let started = Instant::now();

    match f() {
        Ok(value) => {
            debug!(stage = %stage, elapsed_ms = started.elapsed().as_millis() as u64, "Stage complete");
            Ok(value)
        }
        Err(e) => {
            error!(stage = %stage, error = %e, "Stage failed");
            Err(e)
        }
    }
}
