/// Raw resale files, oldest vintage first
pub const RAW_DATA_FILES: [&str; 5] = [
    "ResaleFlatPricesBasedonApprovalDate19901999.csv",
    "ResaleFlatPricesBasedonApprovalDate2000Feb2012.csv",
    "ResaleFlatPricesBasedonRegistrationDateFromMar2012toDec2014.csv",
    "ResaleFlatPricesBasedonRegistrationDateFromJan2015toDec2016.csv",
    "ResaleflatpricesbasedonregistrationdatefromJan2017onwards.csv",
];

/// Directory layout
pub const RAW_DATA_DIR: &str = "data/raw";
pub const EXTERNAL_DATA_DIR: &str = "data/external";
pub const PROCESSED_DATA_DIR: &str = "data/processed";

/// File names
pub const CPI_FILE: &str = "API_FP.CPI.TOTL.ZG_DS2_en_csv_v2_77.csv";
pub const PROCESSED_FILE: &str = "ResaleFlatPrices-Processed.csv";
pub const DEFAULT_CONFIG_FILE: &str = "resale-processor.toml";
pub const ENV_PREFIX: &str = "RESALE";

/// Inflation series defaults
pub const CPI_COUNTRY_COLUMN: &str = "Country Name";
pub const DEFAULT_COUNTRY: &str = "Singapore";
pub const DEFAULT_START_YEAR: i32 = 1990;
pub const DEFAULT_OVERRIDE_YEAR: i32 = 2024;
pub const DEFAULT_OVERRIDE_PCT: f64 = 0.0;

/// Flat type spellings
pub const MULTI_GENERATION_VARIANT: &str = "MULTI GENERATION";
pub const MULTI_GENERATION: &str = "MULTI-GENERATION";

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";

/// Main table column contract
pub const TRANSACTION_COLUMNS: [&str; 19] = [
    "row_id",
    "date",
    "month",
    "year",
    "town",
    "flat_type",
    "block",
    "street_name",
    "storey_range",
    "start_floor",
    "storey_count",
    "floor_area_sqm",
    "flat_model",
    "lease_year",
    "years_leased",
    "resale_price",
    "infl_adj_price",
    "region",
    "planning_area",
];

/// Location table column contract
pub const LOCATION_COLUMNS: [&str; 7] = [
    "row_id",
    "town",
    "street_name",
    "block",
    "planning_area",
    "region",
    "start_floor",
];
