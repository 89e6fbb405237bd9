use clap::Parser;
use pretty_assertions::assert_eq;
use resale_processor::cli::{run, Cli};
use resale_processor::config::PipelineConfig;
use resale_processor::models::Region;
use resale_processor::processors::inflation_adjuster::round_to_tenth;
use resale_processor::processors::Pipeline;
use resale_processor::utils::ProgressReporter;
use resale_processor::writers::ParquetWriter;
use resale_processor::ProcessingError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "month,town,flat_type,block,street_name,storey_range,floor_area_sqm,flat_model,lease_commence_date,resale_price";

const EARLY_ROWS: &[&str] = &[
    "2015-03,BEDOK,3 ROOM,101,BEDOK NTH RD,04 TO 06,67,NEW GENERATION,1980,300000",
    "2015-03,BISHAN,4 ROOM,201,BISHAN ST 22,10 TO 12,92,MODEL A,1992,520000",
    "2015-07,CENTRAL AREA,3 ROOM,2,SMITH ST,01 TO 03,58,STANDARD,1979,350000",
    "2015-08,TAMPINES,5 ROOM,301,TAMPINES ST 32,07 TO 09,121,IMPROVED,2016,610000",
];

const LATE_ROWS: &[&str] = &[
    "2017-01,KALLANG/WHAMPOA,3 ROOM,15,BEACH RD,01 TO 03,60,IMPROVED,1975,280000",
    "2017-02,KALLANG/WHAMPOA,3 ROOM,1,BEACH RD,04 TO 06,60,IMPROVED,1975,290000",
    "2017-06,TAMPINES,MULTI GENERATION,401,TAMPINES ST 44,10 TO 12,160,MULTI GENERATION,1987,780000",
];

fn write_raw(dir: &Path, name: &str, rows: &[&str]) {
    let mut text = format!("{}\n", HEADER);
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    fs::write(dir.join(name), text).unwrap();
}

fn write_cpi(path: &Path) {
    let years: Vec<String> = (2010..=2023).map(|y| format!("\"{}\"", y)).collect();
    let values: Vec<String> = (2010..=2023)
        .map(|y| format!("\"{}\"", 0.5 + (y - 2010) as f64 * 0.25))
        .collect();
    let text = format!(
        "\"Data Source\",\"World Development Indicators\",\n\n\"Last Updated Date\",\"2024-06-28\",\n\n\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",{},\n\"Malaysia\",\"MYS\",\"Inflation, consumer prices (annual %)\",\"FP.CPI.TOTL.ZG\",{},\n\"Singapore\",\"SGP\",\"Inflation, consumer prices (annual %)\",\"FP.CPI.TOTL.ZG\",{},\n",
        years.join(","),
        values.join(","),
        values.join(",")
    );
    fs::write(path, text).unwrap();
}

fn fixture(dir: &Path) -> PipelineConfig {
    let raw_dir = dir.join("raw");
    fs::create_dir_all(&raw_dir).unwrap();
    write_raw(&raw_dir, "early.csv", EARLY_ROWS);
    write_raw(&raw_dir, "late.csv", LATE_ROWS);

    let cpi_file = dir.join("external").join("cpi.csv");
    fs::create_dir_all(cpi_file.parent().unwrap()).unwrap();
    write_cpi(&cpi_file);

    PipelineConfig {
        raw_dir,
        raw_files: vec!["early.csv".to_string(), "late.csv".to_string()],
        cpi_file,
        output_file: dir.join("processed").join("resale.csv"),
        start_year: 2010,
        override_year: 2024,
        override_pct: 0.0,
        ..PipelineConfig::default()
    }
}

#[test]
fn test_bedok_example_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = fixture(dir.path());

    let output = Pipeline::new(config)
        .run(&ProgressReporter::silent())
        .unwrap();
    let bedok = output.records.iter().find(|r| r.town == "Bedok").unwrap();

    assert_eq!(bedok.region, Some(Region::East));
    assert_eq!(bedok.start_floor, 4);
    assert_eq!(bedok.storey_count, 2);
    assert_eq!(bedok.years_leased, 35);

    let cum_index = output.index.cum_index(2015).unwrap();
    let expected: f64 = (2015..=2023)
        .map(|y| 1.0 + (0.5 + (y - 2010) as f64 * 0.25) / 100.0)
        .product();
    assert!((cum_index - expected).abs() < 1e-12);
    assert_eq!(bedok.infl_adj_price, Some(round_to_tenth(300000.0 * cum_index)));
    assert_eq!(output.index.cum_index(2024), Some(1.0));
}

#[test]
fn test_cleaning_rules_hold_across_files() {
    let dir = TempDir::new().unwrap();
    let output = Pipeline::new(fixture(dir.path()))
        .run(&ProgressReporter::silent())
        .unwrap();

    // Tampines lease 2016 sold in 2015 is dropped, its row_id stays unused
    assert_eq!(output.records.len(), 6);
    assert_eq!(output.report.dropped_negative_lease, 1);
    let ids: Vec<u64> = output.records.iter().map(|r| r.row_id).collect();
    assert_eq!(ids, vec![0, 1, 2, 4, 5, 6]);
    assert!(output.records.iter().all(|r| r.years_leased >= 0));

    assert!(output
        .records
        .iter()
        .all(|r| r.flat_type != "Multi Generation"));
    assert!(output
        .records
        .iter()
        .any(|r| r.flat_type == "Multi-Generation"));

    let areas: Vec<(&str, &str)> = output
        .records
        .iter()
        .map(|r| (r.block.as_str(), r.planning_area.as_str()))
        .collect();
    assert!(areas.contains(&("2", "Outram")));
    assert!(areas.contains(&("15", "Kallang")));
    assert!(areas.contains(&("1", "Rochor")));

    let bishan = output.records.iter().find(|r| r.town == "Bishan").unwrap();
    assert_eq!(bishan.region, Some(Region::Central));
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture(dir.path());
    config.location_file = Some(dir.path().join("processed").join("location.csv"));

    let pipeline = Pipeline::new(config.clone());
    pipeline.process(&ProgressReporter::silent()).unwrap();
    let first = fs::read(&config.output_file).unwrap();
    let first_location = fs::read(config.location_file.as_ref().unwrap()).unwrap();

    pipeline.process(&ProgressReporter::silent()).unwrap();
    assert_eq!(fs::read(&config.output_file).unwrap(), first);
    assert_eq!(
        fs::read(config.location_file.as_ref().unwrap()).unwrap(),
        first_location
    );
}

#[test]
fn test_location_table_joins_on_row_id() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture(dir.path());
    config.location_file = Some(dir.path().join("processed").join("location.csv"));

    Pipeline::new(config.clone())
        .process(&ProgressReporter::silent())
        .unwrap();

    let ids = |path: &Path| -> Vec<String> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect()
    };
    let main_ids = ids(&config.output_file);
    assert_eq!(main_ids.len(), 6);
    assert_eq!(main_ids, ids(config.location_file.as_ref().unwrap()));
}

#[test]
fn test_missing_year_index_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        start_year: 2016,
        ..fixture(dir.path())
    };
    let output_file = config.output_file.clone();

    let err = Pipeline::new(config)
        .process(&ProgressReporter::silent())
        .unwrap_err();

    assert!(matches!(
        err,
        ProcessingError::MissingYearIndex { year: 2015, rows: 3 }
    ));
    assert!(!output_file.exists());
}

#[test]
fn test_unmapped_town_strict_and_lenient() {
    let dir = TempDir::new().unwrap();
    let config = fixture(dir.path());
    write_raw(
        &config.raw_dir,
        "late.csv",
        &["2017-03,ATLANTIS,4 ROOM,9,DEEP RD,01 TO 03,90,MODEL A,1990,400000"],
    );

    let err = Pipeline::new(config.clone())
        .run(&ProgressReporter::silent())
        .unwrap_err();
    assert!(matches!(err, ProcessingError::UnmappedRegion { ref town } if town == "Atlantis"));

    let lenient = PipelineConfig {
        strict_regions: false,
        ..config
    };
    let output = Pipeline::new(lenient)
        .run(&ProgressReporter::silent())
        .unwrap();
    let atlantis = output.records.iter().find(|r| r.town == "Atlantis").unwrap();
    assert_eq!(atlantis.region, None);
    assert_eq!(output.report.records_per_region.get("Unmapped"), Some(&1));
}

#[test]
fn test_input_errors() {
    let dir = TempDir::new().unwrap();
    let config = fixture(dir.path());

    fs::write(
        config.raw_dir.join("late.csv"),
        "month,town,flat_type\n2017-01,BEDOK,3 ROOM\n",
    )
    .unwrap();
    let err = Pipeline::new(config.clone())
        .run(&ProgressReporter::silent())
        .unwrap_err();
    assert!(matches!(err, ProcessingError::Schema { .. }));

    let missing = PipelineConfig {
        raw_files: vec!["absent.csv".to_string()],
        ..config
    };
    let err = Pipeline::new(missing)
        .run(&ProgressReporter::silent())
        .unwrap_err();
    assert!(matches!(err, ProcessingError::SourceRead { .. }));
}

#[test]
fn test_cli_writes_parquet_and_report() {
    let dir = TempDir::new().unwrap();
    let config = fixture(dir.path());
    let output = dir.path().join("processed").join("resale.parquet");
    let report = dir.path().join("processed").join("report.json");

    let cli = Cli::parse_from([
        "resale-processor".to_string(),
        "--quiet".to_string(),
        "process".to_string(),
        "--raw-dir".to_string(),
        config.raw_dir.display().to_string(),
        "--raw-file".to_string(),
        "early.csv".to_string(),
        "--raw-file".to_string(),
        "late.csv".to_string(),
        "--cpi-file".to_string(),
        config.cpi_file.display().to_string(),
        "--start-year".to_string(),
        "2010".to_string(),
        "--output-file".to_string(),
        output.display().to_string(),
        "--report-file".to_string(),
        report.display().to_string(),
        "--compression".to_string(),
        "zstd".to_string(),
    ]);
    run(cli).unwrap();

    let info = ParquetWriter::new().get_file_info(&output).unwrap();
    assert_eq!(info.total_rows, 6);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["raw_rows"], 7);
    assert_eq!(json["dropped_negative_lease"], 1);
}
