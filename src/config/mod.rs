use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::error::Result;
use crate::processors::InflationSettings;
use crate::readers::TransactionReader;
use crate::utils::constants::{
    COMPRESSION_SNAPPY, CPI_FILE, DEFAULT_CONFIG_FILE, DEFAULT_COUNTRY, DEFAULT_OVERRIDE_PCT,
    DEFAULT_OVERRIDE_YEAR, DEFAULT_ROW_GROUP_SIZE, DEFAULT_START_YEAR, ENV_PREFIX,
    EXTERNAL_DATA_DIR, PROCESSED_DATA_DIR, PROCESSED_FILE, RAW_DATA_DIR, RAW_DATA_FILES,
};

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_year_order"))]
pub struct PipelineConfig {
    pub raw_dir: PathBuf,
    /// Raw file names, resolved against `raw_dir` and read in this order
    #[validate(length(min = 1, message = "at least one raw file is required"))]
    pub raw_files: Vec<String>,
    pub cpi_file: PathBuf,
    pub output_file: PathBuf,
    pub location_file: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    #[validate(length(min = 1))]
    pub country: String,
    #[validate(range(min = 1900, max = 2200))]
    pub start_year: i32,
    #[validate(range(min = 1900, max = 2200))]
    pub override_year: i32,
    pub override_pct: f64,
    /// Fail on towns without a region instead of leaving the region empty
    pub strict_regions: bool,
    pub compression: String,
    #[validate(range(min = 1))]
    pub row_group_size: usize,
}

fn validate_year_order(config: &PipelineConfig) -> std::result::Result<(), ValidationError> {
    if config.start_year > config.override_year {
        let mut err = ValidationError::new("year_order");
        err.message = Some("start_year must not be after override_year".into());
        return Err(err);
    }
    Ok(())
}

/// Values given on the command line. `None` leaves the layered value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub raw_dir: Option<PathBuf>,
    pub raw_files: Vec<String>,
    pub cpi_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub location_file: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    pub country: Option<String>,
    pub start_year: Option<i32>,
    pub override_year: Option<i32>,
    pub override_pct: Option<f64>,
    pub compression: Option<String>,
    pub allow_unmapped_regions: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from(RAW_DATA_DIR),
            raw_files: RAW_DATA_FILES.iter().map(|f| f.to_string()).collect(),
            cpi_file: Path::new(EXTERNAL_DATA_DIR).join(CPI_FILE),
            output_file: Path::new(PROCESSED_DATA_DIR).join(PROCESSED_FILE),
            location_file: None,
            report_file: None,
            country: DEFAULT_COUNTRY.to_string(),
            start_year: DEFAULT_START_YEAR,
            override_year: DEFAULT_OVERRIDE_YEAR,
            override_pct: DEFAULT_OVERRIDE_PCT,
            strict_regions: true,
            compression: COMPRESSION_SNAPPY.to_string(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Layer built-in defaults, a TOML file, `RESALE__*` environment
    /// variables and command line overrides, in that order.
    ///
    /// Without an explicit file, `resale-processor.toml` in the working
    /// directory is used when present.
    pub fn load(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let defaults = PipelineConfig::default();

        let mut builder = Config::builder()
            .set_default("raw_dir", path_value(&defaults.raw_dir))?
            .set_default("raw_files", defaults.raw_files.clone())?
            .set_default("cpi_file", path_value(&defaults.cpi_file))?
            .set_default("output_file", path_value(&defaults.output_file))?
            .set_default("country", defaults.country.clone())?
            .set_default("start_year", i64::from(defaults.start_year))?
            .set_default("override_year", i64::from(defaults.override_year))?
            .set_default("override_pct", defaults.override_pct)?
            .set_default("strict_regions", defaults.strict_regions)?
            .set_default("compression", defaults.compression.clone())?
            .set_default("row_group_size", defaults.row_group_size as i64)?;

        match config_file {
            Some(path) => {
                debug!(file = %path.display(), "Loading configuration file");
                builder = builder.add_source(File::from(path));
            }
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    debug!(file = DEFAULT_CONFIG_FILE, "Loading configuration file");
                    builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("raw_files"),
        );

        if let Some(dir) = &overrides.raw_dir {
            builder = builder.set_override("raw_dir", path_value(dir))?;
        }
        if !overrides.raw_files.is_empty() {
            builder = builder.set_override("raw_files", overrides.raw_files.clone())?;
        }
        if let Some(path) = &overrides.cpi_file {
            builder = builder.set_override("cpi_file", path_value(path))?;
        }
        if let Some(path) = &overrides.output_file {
            builder = builder.set_override("output_file", path_value(path))?;
        }
        if let Some(path) = &overrides.location_file {
            builder = builder.set_override("location_file", path_value(path))?;
        }
        if let Some(path) = &overrides.report_file {
            builder = builder.set_override("report_file", path_value(path))?;
        }
        if let Some(country) = &overrides.country {
            builder = builder.set_override("country", country.clone())?;
        }
        if let Some(year) = overrides.start_year {
            builder = builder.set_override("start_year", i64::from(year))?;
        }
        if let Some(year) = overrides.override_year {
            builder = builder.set_override("override_year", i64::from(year))?;
        }
        if let Some(pct) = overrides.override_pct {
            builder = builder.set_override("override_pct", pct)?;
        }
        if let Some(compression) = &overrides.compression {
            builder = builder.set_override("compression", compression.clone())?;
        }
        if overrides.allow_unmapped_regions {
            builder = builder.set_override("strict_regions", false)?;
        }

        let config: PipelineConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Raw input paths in read order
    pub fn raw_paths(&self) -> Vec<PathBuf> {
        TransactionReader::resolve_paths(&self.raw_dir, &self.raw_files)
    }

    pub fn inflation_settings(&self) -> InflationSettings {
        InflationSettings {
            country: self.country.clone(),
            start_year: self.start_year,
            override_year: self.override_year,
            override_pct: self.override_pct,
        }
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
