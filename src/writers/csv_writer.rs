use std::io::Write;

use crate::error::Result;
use crate::models::{LocationRecord, Transaction};
use crate::utils::constants::{LOCATION_COLUMNS, TRANSACTION_COLUMNS};

/// Writes tables as comma separated text with a header row
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_transactions<W: Write>(&self, records: &[Transaction], out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(TRANSACTION_COLUMNS)?;

        for r in records {
            writer.write_record([
                r.row_id.to_string(),
                r.date.format("%Y-%m-%d").to_string(),
                r.month.to_string(),
                r.year.to_string(),
                r.town.clone(),
                r.flat_type.clone(),
                r.block.clone(),
                r.street_name.clone(),
                r.storey_range.clone(),
                r.start_floor.to_string(),
                r.storey_count.to_string(),
                format_float(r.floor_area_sqm),
                r.flat_model.clone(),
                r.lease_year.to_string(),
                r.years_leased.to_string(),
                format_float(r.resale_price),
                r.infl_adj_price.map(format_float).unwrap_or_default(),
                r.region.map(|g| g.to_string()).unwrap_or_default(),
                r.planning_area.clone(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn write_locations<W: Write>(&self, records: &[LocationRecord], out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(LOCATION_COLUMNS)?;

        for r in records {
            writer.write_record([
                r.row_id.to_string(),
                r.town.clone(),
                r.street_name.clone(),
                r.block.clone(),
                r.planning_area.clone(),
                r.region.map(|g| g.to_string()).unwrap_or_default(),
                r.start_floor.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest round-trip text, keeping a trailing `.0` on whole numbers
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
