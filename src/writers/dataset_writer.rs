use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{LocationRecord, Transaction};
use crate::writers::{CsvWriter, ParquetWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
    /// Run report only; tables are never written as JSON
    Json,
}

impl OutputFormat {
    /// `.parquet` and `.pq` select Parquet, everything else is CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("parquet") | Some("pq") => OutputFormat::Parquet,
            _ => OutputFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub rows: usize,
}

/// Persists the processed tables and the optional run report.
///
/// Every file is written and synced to a temporary file next to its
/// destination first. Renames start only once all of them are complete, and
/// a failed rename removes the files this call already put in place.
pub struct DatasetWriter {
    csv: CsvWriter,
    parquet: ParquetWriter,
}

impl DatasetWriter {
    pub fn new(parquet: ParquetWriter) -> Self {
        Self {
            csv: CsvWriter::new(),
            parquet,
        }
    }

    pub fn parquet(&self) -> &ParquetWriter {
        &self.parquet
    }

    pub fn write(
        &self,
        records: &[Transaction],
        output: &Path,
        location_output: Option<&Path>,
    ) -> Result<Vec<WrittenFile>> {
        self.write_with_report::<()>(records, output, location_output, None)
    }

    pub fn write_with_report<R: Serialize>(
        &self,
        records: &[Transaction],
        output: &Path,
        location_output: Option<&Path>,
        report: Option<(&Path, &R)>,
    ) -> Result<Vec<WrittenFile>> {
        let mut destinations = vec![output];
        destinations.extend(location_output);
        destinations.extend(report.map(|(path, _)| path));
        for (i, path) in destinations.iter().enumerate() {
            if destinations[..i].contains(path) {
                return Err(ProcessingError::Config(format!(
                    "Output path {} is used more than once",
                    path.display()
                )));
            }
        }

        let mut staged = Vec::new();

        let format = OutputFormat::from_path(output);
        let mut temp = staging_file(output)?;
        match format {
            OutputFormat::Parquet => self.parquet.write_transactions(records, temp.as_file_mut())?,
            _ => self.csv.write_transactions(records, temp.as_file_mut())?,
        }
        staged.push(Staged::new(temp, output, format, records.len())?);

        if let Some(location_output) = location_output {
            let locations: Vec<LocationRecord> = records.iter().map(Transaction::location).collect();
            let format = OutputFormat::from_path(location_output);
            let mut temp = staging_file(location_output)?;
            match format {
                OutputFormat::Parquet => {
                    self.parquet.write_locations(&locations, temp.as_file_mut())?
                }
                _ => self.csv.write_locations(&locations, temp.as_file_mut())?,
            }
            staged.push(Staged::new(temp, location_output, format, locations.len())?);
        }

        if let Some((report_output, report)) = report {
            let mut temp = staging_file(report_output)?;
            serde_json::to_writer_pretty(temp.as_file_mut(), report)?;
            staged.push(Staged::new(temp, report_output, OutputFormat::Json, 0)?);
        }

        commit(staged)
    }
}

struct Staged {
    temp: NamedTempFile,
    file: WrittenFile,
}

impl Staged {
    fn new(temp: NamedTempFile, path: &Path, format: OutputFormat, rows: usize) -> Result<Self> {
        temp.as_file().sync_all()?;
        Ok(Self {
            temp,
            file: WrittenFile {
                path: path.to_path_buf(),
                format,
                rows,
            },
        })
    }
}

fn commit(staged: Vec<Staged>) -> Result<Vec<WrittenFile>> {
    let mut written: Vec<WrittenFile> = Vec::with_capacity(staged.len());

    for Staged { temp, file } in staged {
        if let Err(e) = temp.persist(&file.path) {
            for done in &written {
                if let Err(remove_err) = fs::remove_file(&done.path) {
                    warn!(path = %done.path.display(), error = %remove_err, "Could not roll back output");
                }
            }
            return Err(ProcessingError::Io(e.error));
        }
        written.push(file);
    }

    for file in &written {
        info!(
            path = %file.path.display(),
            format = ?file.format,
            rows = file.rows,
            "Wrote file"
        );
    }
    Ok(written)
}

impl Default for DatasetWriter {
    fn default() -> Self {
        Self::new(ParquetWriter::new())
    }
}

fn staging_file(destination: &Path) -> Result<NamedTempFile> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    Ok(tempfile::Builder::new()
        .prefix(".resale-")
        .suffix(".tmp")
        .tempfile_in(dir)?)
}
