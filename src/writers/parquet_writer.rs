use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::Datelike;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ProcessingError, Result};
use crate::models::{LocationRecord, Transaction};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_BATCH_SIZE, DEFAULT_ROW_GROUP_SIZE,
};

/// Days between 0001-01-01 and 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
    batch_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    fn properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }

    /// Write the main table in batches
    pub fn write_transactions<W: Write + Send>(&self, records: &[Transaction], out: W) -> Result<()> {
        let schema = transaction_schema();
        let mut writer = ArrowWriter::try_new(out, schema.clone(), Some(self.properties()))?;

        for chunk in records.chunks(self.batch_size) {
            let batch = transactions_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Write the location table in batches
    pub fn write_locations<W: Write + Send>(&self, records: &[LocationRecord], out: W) -> Result<()> {
        let schema = location_schema();
        let mut writer = ArrowWriter::try_new(out, schema.clone(), Some(self.properties()))?;

        for chunk in records.chunks(self.batch_size) {
            let batch = locations_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let row_group_sizes = (0..row_groups)
            .map(|i| metadata.row_group(i).num_rows())
            .collect();

        Ok(ParquetFileInfo {
            total_rows: metadata.file_metadata().num_rows(),
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size: std::fs::metadata(path)?.len(),
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow schema of the main table, in column contract order
pub fn transaction_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("row_id", DataType::UInt64, false),
        Field::new("date", DataType::Date32, false),
        Field::new("month", DataType::UInt32, false),
        Field::new("year", DataType::Int32, false),
        Field::new("town", DataType::Utf8, false),
        Field::new("flat_type", DataType::Utf8, false),
        Field::new("block", DataType::Utf8, false),
        Field::new("street_name", DataType::Utf8, false),
        Field::new("storey_range", DataType::Utf8, false),
        Field::new("start_floor", DataType::Int32, false),
        Field::new("storey_count", DataType::Int32, false),
        Field::new("floor_area_sqm", DataType::Float64, false),
        Field::new("flat_model", DataType::Utf8, false),
        Field::new("lease_year", DataType::Int32, false),
        Field::new("years_leased", DataType::Int32, false),
        Field::new("resale_price", DataType::Float64, false),
        Field::new("infl_adj_price", DataType::Float64, true),
        Field::new("region", DataType::Utf8, true),
        Field::new("planning_area", DataType::Utf8, false),
    ]))
}

/// Arrow schema of the location table
pub fn location_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("row_id", DataType::UInt64, false),
        Field::new("town", DataType::Utf8, false),
        Field::new("street_name", DataType::Utf8, false),
        Field::new("block", DataType::Utf8, false),
        Field::new("planning_area", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, true),
        Field::new("start_floor", DataType::Int32, false),
    ]))
}

fn transactions_to_batch(records: &[Transaction], schema: Arc<Schema>) -> Result<RecordBatch> {
    let strings = |f: fn(&Transaction) -> &str| -> ArrayRef {
        Arc::new(StringArray::from_iter_values(records.iter().map(f)))
    };

    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from_iter_values(records.iter().map(|r| r.row_id))),
        Arc::new(Date32Array::from_iter_values(
            records
                .iter()
                .map(|r| r.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE),
        )),
        Arc::new(UInt32Array::from_iter_values(records.iter().map(|r| r.month))),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.year))),
        strings(|r| r.town.as_str()),
        strings(|r| r.flat_type.as_str()),
        strings(|r| r.block.as_str()),
        strings(|r| r.street_name.as_str()),
        strings(|r| r.storey_range.as_str()),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.start_floor))),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.storey_count))),
        Arc::new(Float64Array::from_iter_values(
            records.iter().map(|r| r.floor_area_sqm),
        )),
        strings(|r| r.flat_model.as_str()),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.lease_year))),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.years_leased))),
        Arc::new(Float64Array::from_iter_values(
            records.iter().map(|r| r.resale_price),
        )),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.infl_adj_price).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.region.map(|g| g.as_str()))
                .collect::<Vec<_>>(),
        )),
        strings(|r| r.planning_area.as_str()),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn locations_to_batch(records: &[LocationRecord], schema: Arc<Schema>) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from_iter_values(records.iter().map(|r| r.row_id))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.town.as_str()))),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.street_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.block.as_str()))),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.planning_area.as_str()),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.region.map(|g| g.as_str()))
                .collect::<Vec<_>>(),
        )),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.start_floor))),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0,
            self.compression,
            self.total_rows as f64 / self.row_groups.max(1) as f64
        )
    }
}
