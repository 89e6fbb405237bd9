use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Parser)]
#[command(name = "resale-processor")]
#[command(about = "Cleans and enriches HDB resale flat transactions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: resale-processor.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide progress and summaries")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean, enrich and write the resale dataset
    Process {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, help = "Output file, .parquet selects Parquet [default: data/processed/ResaleFlatPrices-Processed.csv]")]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Companion location table keyed by row_id")]
        location_file: Option<PathBuf>,

        #[arg(long, help = "JSON run report path")]
        report_file: Option<PathBuf>,

        #[arg(long, help = "Parquet compression (snappy, gzip, lz4, zstd, none)")]
        compression: Option<String>,
    },

    /// Run every stage without writing and print the quality report
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(long, help = "Directory holding the raw files [default: data/raw]")]
    pub raw_dir: Option<PathBuf>,

    #[arg(long = "raw-file", help = "Raw file name, repeat in read order")]
    pub raw_files: Vec<String>,

    #[arg(long, help = "Inflation indicator file")]
    pub cpi_file: Option<PathBuf>,

    #[arg(long, help = "Country row of the inflation file [default: Singapore]")]
    pub country: Option<String>,

    #[arg(long, help = "First year of the inflation series [default: 1990]")]
    pub start_year: Option<i32>,

    #[arg(long, help = "Year appended with a known figure [default: 2024]")]
    pub override_year: Option<i32>,

    #[arg(long, allow_negative_numbers = true, help = "Inflation percent for the override year [default: 0.0]")]
    pub override_pct: Option<f64>,

    #[arg(long, help = "Leave the region empty for unknown towns instead of failing")]
    pub allow_unmapped_regions: bool,
}

impl InputArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            raw_dir: self.raw_dir.clone(),
            raw_files: self.raw_files.clone(),
            cpi_file: self.cpi_file.clone(),
            country: self.country.clone(),
            start_year: self.start_year,
            override_year: self.override_year,
            override_pct: self.override_pct,
            allow_unmapped_regions: self.allow_unmapped_regions,
            ..ConfigOverrides::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_process_flags_become_overrides() {
        let cli = Cli::parse_from([
            "resale-processor",
            "--quiet",
            "process",
            "--raw-file",
            "a.csv",
            "--raw-file",
            "b.csv",
            "--override-pct",
            "-0.5",
            "--allow-unmapped-regions",
            "--output-file",
            "out.parquet",
        ]);

        assert!(cli.quiet);
        match cli.command {
            Commands::Process {
                input, output_file, ..
            } => {
                let overrides = input.overrides();
                assert_eq!(overrides.raw_files, vec!["a.csv", "b.csv"]);
                assert_eq!(overrides.override_pct, Some(-0.5));
                assert!(overrides.allow_unmapped_regions);
                assert_eq!(output_file, Some(PathBuf::from("out.parquet")));
            }
            Commands::Validate { .. } => panic!("expected process"),
        }
    }
}
