use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{IndexEntry, InflationIndex, Transaction};
use crate::readers::CpiTable;
use crate::utils::constants::{
    DEFAULT_COUNTRY, DEFAULT_OVERRIDE_PCT, DEFAULT_OVERRIDE_YEAR, DEFAULT_START_YEAR,
};

#[derive(Debug, Clone, PartialEq)]
pub struct InflationSettings {
    pub country: String,
    pub start_year: i32,
    /// Most recent year, appended with a known figure instead of read from source
    pub override_year: i32,
    pub override_pct: f64,
}

impl Default for InflationSettings {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            start_year: DEFAULT_START_YEAR,
            override_year: DEFAULT_OVERRIDE_YEAR,
            override_pct: DEFAULT_OVERRIDE_PCT,
        }
    }
}

/// Converts nominal resale prices into present-value terms
pub struct InflationAdjuster {
    settings: InflationSettings,
}

impl InflationAdjuster {
    pub fn new(settings: InflationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &InflationSettings {
        &self.settings
    }

    /// Build the yearly index from one country's row of the CPI table.
    ///
    /// Every year from the start year up to the override year must have a
    /// value; the compounding chain cannot cross a gap.
    pub fn build_index(&self, table: &CpiTable) -> Result<InflationIndex> {
        let s = &self.settings;
        if s.start_year > s.override_year {
            return Err(ProcessingError::Config(format!(
                "Inflation start year {} is after override year {}",
                s.start_year, s.override_year
            )));
        }

        let row = table.country(&s.country).ok_or_else(|| {
            ProcessingError::MissingData(format!(
                "Country '{}' not found in {}",
                s.country,
                table.path.display()
            ))
        })?;

        let mut series = Vec::new();
        let mut missing = Vec::new();
        for year in s.start_year..s.override_year {
            match row.values.get(&year).copied().flatten() {
                Some(pct) => series.push((year, pct)),
                None => missing.push(year),
            }
        }

        if !missing.is_empty() {
            return Err(ProcessingError::MissingData(format!(
                "No inflation figure for {} in years {:?}",
                s.country, missing
            )));
        }

        if let Some(Some(source_pct)) = row.values.get(&s.override_year) {
            warn!(
                year = s.override_year,
                source = source_pct,
                replacement = s.override_pct,
                "Source already has the override year, using the override value"
            );
        }
        series.push((s.override_year, s.override_pct));

        let index = InflationIndex::from_entries(compounding_index(&series));
        info!(
            country = %s.country,
            first_year = index.first_year(),
            last_year = index.last_year(),
            "Built cumulative inflation index"
        );
        Ok(index)
    }

    /// Set `infl_adj_price` on every record.
    ///
    /// Fails without touching any record if a year has no index entry.
    pub fn apply(&self, index: &InflationIndex, records: &mut [Transaction]) -> Result<()> {
        let mut unmatched: BTreeMap<i32, usize> = BTreeMap::new();
        for record in records.iter() {
            if index.cum_index(record.year).is_none() {
                *unmatched.entry(record.year).or_default() += 1;
            }
        }

        if let Some((&year, &rows)) = unmatched.iter().next() {
            if unmatched.len() > 1 {
                warn!(years = ?unmatched.keys().collect::<Vec<_>>(), "Several years have no inflation index");
            }
            return Err(ProcessingError::MissingYearIndex { year, rows });
        }

        for record in records.iter_mut() {
            if let Some(cum_index) = index.cum_index(record.year) {
                record.infl_adj_price = Some(adjust_price(record.resale_price, cum_index));
            }
        }

        info!(records = records.len(), "Applied inflation adjustment");
        Ok(())
    }
}

impl Default for InflationAdjuster {
    fn default() -> Self {
        Self::new(InflationSettings::default())
    }
}

/// Index entries for an ascending `(year, pct_change)` series.
///
/// The cumulative index is the product of multipliers taken from the most
/// recent year backwards, so the last year's index is its own multiplier and
/// each earlier year compounds everything after it.
pub fn compounding_index(series: &[(i32, f64)]) -> Vec<IndexEntry> {
    let mut entries: Vec<IndexEntry> = series
        .iter()
        .map(|&(year, pct_change)| IndexEntry {
            year,
            pct_change,
            multiplier: 1.0 + pct_change / 100.0,
            cum_index: 1.0,
        })
        .collect();

    let mut running = 1.0;
    for entry in entries.iter_mut().rev() {
        running *= entry.multiplier;
        entry.cum_index = running;
    }

    entries
}

pub fn adjust_price(resale_price: f64, cum_index: f64) -> f64 {
    round_to_tenth(resale_price * cum_index)
}

/// Round to one decimal place, ties to even
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
