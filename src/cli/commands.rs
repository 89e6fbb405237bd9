use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::processors::{Pipeline, QualityChecker};
use crate::utils::progress::ProgressReporter;
use crate::writers::{OutputFormat, ParquetWriter};

pub fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;

    match cli.command {
        Commands::Process {
            input,
            output_file,
            location_file,
            report_file,
            compression,
        } => {
            let mut overrides = input.overrides();
            overrides.output_file = output_file;
            overrides.location_file = location_file;
            overrides.report_file = report_file;
            overrides.compression = compression;
            let config = PipelineConfig::load(cli.config.as_deref(), &overrides)?;

            if !quiet {
                println!("Processing resale transactions...");
                println!("Raw directory: {}", config.raw_dir.display());
                println!("Output file: {}", config.output_file.display());
            }

            let progress = ProgressReporter::new_spinner("Processing data...", quiet);
            let pipeline = Pipeline::new(config);
            let (output, written) = match pipeline.process(&progress) {
                Ok(result) => result,
                Err(e) => {
                    progress.abandon_with_message("Processing failed");
                    return Err(e);
                }
            };
            progress.finish_with_message(&format!("Processed {} records", output.records.len()));

            if quiet {
                return Ok(());
            }

            println!("\n{}", QualityChecker::new().generate_summary(&output.report));
            for file in &written {
                match file.format {
                    OutputFormat::Json => println!("Wrote run report to {}", file.path.display()),
                    OutputFormat::Csv => {
                        println!("Wrote {} rows to {}", file.rows, file.path.display())
                    }
                    OutputFormat::Parquet => {
                        println!("Wrote {} rows to {}", file.rows, file.path.display());
                        let info = ParquetWriter::new().get_file_info(&file.path)?;
                        println!("{}", info.summary());
                    }
                }
            }
            println!("Processing complete!");
        }

        Commands::Validate { input } => {
            let config = PipelineConfig::load(cli.config.as_deref(), &input.overrides())?;

            let progress = ProgressReporter::new_spinner("Validating data...", quiet);
            let output = match Pipeline::new(config).run(&progress) {
                Ok(output) => output,
                Err(e) => {
                    progress.abandon_with_message("Validation failed");
                    return Err(e);
                }
            };
            progress.finish_with_message("Validation complete");

            if quiet {
                return Ok(());
            }

            println!("\n{}", QualityChecker::new().generate_summary(&output.report));
            match output.report.total_violations() {
                0 => println!("All records passed validation checks"),
                n => println!("Found {} validation issues", n),
            }
        }
    }

    Ok(())
}
