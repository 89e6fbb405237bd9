use regex::Regex;
use std::sync::LazyLock;
use tracing::info;

use crate::error::{ProcessingError, Result};
use crate::models::Transaction;

static STOREY_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s+TO\s+(\d+)\s*$").expect("storey range pattern is valid")
});

/// Floor span parsed from a storey range such as `"10 TO 12"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreySpan {
    pub start_floor: i32,
    pub storey_count: i32,
}

/// Parse `"<start> TO <end>"`. Spans are not checked for plausibility, so a
/// reversed range yields a negative `storey_count`.
pub fn parse_storey_range(value: &str) -> Result<StoreySpan> {
    let malformed = || ProcessingError::MalformedRange {
        value: value.to_string(),
    };

    let caps = STOREY_RANGE.captures(value).ok_or_else(malformed)?;
    let start = caps[1].parse::<i32>().map_err(|_| malformed())?;
    let end = caps[2].parse::<i32>().map_err(|_| malformed())?;

    Ok(StoreySpan {
        start_floor: start,
        storey_count: end - start,
    })
}

pub struct StoreyRangeParser;

impl StoreyRangeParser {
    pub fn new() -> Self {
        Self
    }

    /// Fill `start_floor` and `storey_count` on every record
    pub fn apply(&self, records: &mut [Transaction]) -> Result<()> {
        for record in records.iter_mut() {
            let span = parse_storey_range(&record.storey_range)?;
            record.start_floor = span.start_floor;
            record.storey_count = span.storey_count;
        }
        info!(records = records.len(), "Parsed storey ranges");
        Ok(())
    }
}

impl Default for StoreyRangeParser {
    fn default() -> Self {
        Self::new()
    }
}
