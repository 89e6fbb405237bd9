use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One year of the compounding price index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub year: i32,
    pub pct_change: f64,
    pub multiplier: f64,
    pub cum_index: f64,
}

/// Yearly cumulative index; `cum_index` for a year is the compounded growth
/// from that year through the most recent year, inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InflationIndex {
    entries: BTreeMap<i32, IndexEntry>,
}

impl InflationIndex {
    pub fn from_entries(entries: impl IntoIterator<Item = IndexEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.year, e)).collect(),
        }
    }

    pub fn cum_index(&self, year: i32) -> Option<f64> {
        self.entries.get(&year).map(|e| e.cum_index)
    }

    pub fn entry(&self, year: i32) -> Option<&IndexEntry> {
        self.entries.get(&year)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.entries.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.entries.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
