use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{RawTransaction, Transaction};
use crate::utils::constants::{MULTI_GENERATION, MULTI_GENERATION_VARIANT};
use crate::utils::text::normalize_label;

/// Result of normalizing the raw table
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub records: Vec<Transaction>,
    pub input_rows: usize,
    /// Rows whose lease commencement year is after the transaction year
    pub dropped_negative_lease: usize,
}

/// Standardizes raw fields and derives dates and lease age
pub struct FieldNormalizer;

impl FieldNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize every raw row, assigning `row_id` from its position in the
    /// concatenated input. Rows with a negative lease age are excluded.
    pub fn normalize(&self, raw: Vec<RawTransaction>) -> Result<NormalizedTable> {
        let input_rows = raw.len();
        let mut records = Vec::with_capacity(input_rows);
        let mut dropped = 0;

        for (position, row) in raw.into_iter().enumerate() {
            let record = self.normalize_row(position as u64, row)?;
            if record.years_leased < 0 {
                dropped += 1;
                continue;
            }
            records.push(record);
        }

        if dropped > 0 {
            warn!(
                dropped,
                remaining = records.len(),
                "Dropped rows with lease commencement after transaction year"
            );
        }
        info!(input_rows, output_rows = records.len(), "Normalized transactions");

        Ok(NormalizedTable {
            records,
            input_rows,
            dropped_negative_lease: dropped,
        })
    }

    /// Normalize one raw row. Storey, region and price fields are left for
    /// later stages; `planning_area` starts as the town.
    pub fn normalize_row(&self, row_id: u64, raw: RawTransaction) -> Result<Transaction> {
        let date = parse_month(&raw.month).map_err(|source| ProcessingError::DateParse {
            value: raw.month.clone(),
            row_id,
            source,
        })?;
        let year = date.year();
        let years_leased = year.checked_sub(raw.lease_commence_date).ok_or_else(|| {
            ProcessingError::InvalidFormat(format!(
                "Lease commencement year {} out of range in row {}",
                raw.lease_commence_date, row_id
            ))
        })?;
        let town = normalize_label(&raw.town);

        Ok(Transaction {
            row_id,
            date,
            month: date.month(),
            year,
            planning_area: town.clone(),
            town,
            flat_type: normalize_label(&canonical_flat_type(&raw.flat_type)),
            block: raw.block.trim().to_string(),
            street_name: normalize_label(&raw.street_name),
            storey_range: raw.storey_range.trim().to_string(),
            start_floor: 0,
            storey_count: 0,
            floor_area_sqm: raw.floor_area_sqm,
            flat_model: normalize_label(&raw.flat_model),
            lease_year: raw.lease_commence_date,
            years_leased,
            resale_price: raw.resale_price,
            infl_adj_price: None,
            region: None,
        })
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `YYYY-MM` month into the first day of that month
pub fn parse_month(month: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
}

/// Unify the spelling variants of a flat type
pub fn canonical_flat_type(flat_type: &str) -> String {
    let trimmed = flat_type.trim();
    if trimmed.eq_ignore_ascii_case(MULTI_GENERATION_VARIANT) {
        MULTI_GENERATION.to_string()
    } else {
        trimmed.to_string()
    }
}
