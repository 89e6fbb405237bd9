pub mod csv_writer;
pub mod dataset_writer;
pub mod parquet_writer;

pub use csv_writer::CsvWriter;
pub use dataset_writer::{DatasetWriter, OutputFormat, WrittenFile};
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
