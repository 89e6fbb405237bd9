use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::readers::encoding::read_source_text;
use crate::utils::constants::CPI_COUNTRY_COLUMN;

/// One country's row of annual percentage changes; `None` marks an empty cell
#[derive(Debug, Clone, PartialEq)]
pub struct CpiRow {
    pub country: String,
    pub values: BTreeMap<i32, Option<f64>>,
}

/// Consumer price index table: one row per country, one column per year
#[derive(Debug, Clone)]
pub struct CpiTable {
    pub path: PathBuf,
    pub rows: Vec<CpiRow>,
}

impl CpiTable {
    pub fn country(&self, name: &str) -> Option<&CpiRow> {
        self.rows.iter().find(|r| r.country == name)
    }
}

pub struct CpiReader;

impl CpiReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a World Bank style indicator export.
    ///
    /// Metadata lines before the header (`"Data Source",...`) are skipped;
    /// the header is the first line whose first cell is `Country Name`.
    /// Columns whose header is not a year are ignored.
    pub fn read_table(&self, path: &Path) -> Result<CpiTable> {
        let text = read_source_text(path)?;

        let header_offset = find_header_offset(&text).ok_or_else(|| ProcessingError::Schema {
            path: path.to_path_buf(),
            column: CPI_COUNTRY_COLUMN.to_string(),
        })?;
        debug!(file = %path.display(), offset = header_offset, "Located CPI header");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text[header_offset..].as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ProcessingError::source_read(path, e))?
            .clone();

        let country_idx = headers
            .iter()
            .position(|h| h == CPI_COUNTRY_COLUMN)
            .ok_or_else(|| ProcessingError::Schema {
                path: path.to_path_buf(),
                column: CPI_COUNTRY_COLUMN.to_string(),
            })?;

        let year_columns: Vec<(usize, i32)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| h.parse::<i32>().ok().map(|year| (idx, year)))
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| ProcessingError::source_read(path, e))?;
            let Some(country) = record.get(country_idx) else {
                continue;
            };

            let mut values = BTreeMap::new();
            for &(idx, year) in &year_columns {
                let cell = record.get(idx).unwrap_or("");
                let value = if cell.is_empty() {
                    None
                } else {
                    Some(cell.parse::<f64>().map_err(|_| {
                        ProcessingError::InvalidFormat(format!(
                            "Invalid CPI value '{}' for {} in {}",
                            cell, country, year
                        ))
                    })?)
                };
                values.insert(year, value);
            }

            rows.push(CpiRow {
                country: country.to_string(),
                values,
            });
        }

        Ok(CpiTable {
            path: path.to_path_buf(),
            rows,
        })
    }
}

impl Default for CpiReader {
    fn default() -> Self {
        Self::new()
    }
}

fn find_header_offset(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let first_cell = line.split(',').next().unwrap_or("").trim().trim_matches('"');
        if first_cell == CPI_COUNTRY_COLUMN {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_with_metadata_preamble() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"\xEF\xBB\xBF")?;
        writeln!(file, "\"Data Source\",\"World Development Indicators\",")?;
        writeln!(file)?;
        writeln!(file, "\"Last Updated Date\",\"2024-06-28\",")?;
        writeln!(file)?;
        writeln!(
            file,
            "\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"2021\",\"2022\",\"2023\","
        )?;
        writeln!(
            file,
            "\"Singapore\",\"SGP\",\"Inflation, consumer prices (annual %)\",\"FP.CPI.TOTL.ZG\",\"2.3\",\"6.1\",\"4.8\","
        )?;
        writeln!(
            file,
            "\"Aruba\",\"ABW\",\"Inflation, consumer prices (annual %)\",\"FP.CPI.TOTL.ZG\",\"0.7\",\"\",\"3.1\","
        )?;

        let table = CpiReader::new().read_table(file.path())?;

        assert_eq!(table.rows.len(), 2);
        let singapore = table.country("Singapore").unwrap();
        assert_eq!(singapore.values.get(&2022), Some(&Some(6.1)));
        assert_eq!(singapore.values.len(), 3);

        let aruba = table.country("Aruba").unwrap();
        assert_eq!(aruba.values.get(&2022), Some(&None));
        Ok(())
    }

    #[test]
    fn test_read_plain_table() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "Country Name,Country Code,1990,1991")?;
        writeln!(file, "Singapore,SGP,3.5,3.4")?;

        let table = CpiReader::new().read_table(file.path())?;
        let row = table.country("Singapore").unwrap();
        assert_eq!(row.values.get(&1990), Some(&Some(3.5)));
        Ok(())
    }

    #[test]
    fn test_missing_country_column() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "Country,1990")?;
        writeln!(file, "Singapore,3.5")?;

        let err = CpiReader::new().read_table(file.path()).unwrap_err();
        assert!(matches!(err, ProcessingError::Schema { .. }));
        Ok(())
    }
}
