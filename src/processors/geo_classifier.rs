use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{Region, Transaction};
use crate::processors::planning_rules::{BlockRule, StreetRule, BLOCK_RULES, STREET_RULES};

/// What the classifier did to the table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationSummary {
    /// Towns without a region and how many records carry them
    pub unmapped_towns: BTreeMap<String, usize>,
    /// Records whose planning area differs from their town, per planning area
    pub refined: BTreeMap<String, usize>,
    /// Records decided by a block-level override
    pub block_overrides: usize,
}

struct CompiledStreetRule {
    town: String,
    planning_area: String,
    fragments: Vec<String>,
}

struct CompiledBlockRule {
    town: String,
    street: String,
    planning_area: String,
    fragments: Vec<String>,
}

/// Assigns regions and refines planning areas
pub struct GeoClassifier {
    street_rules: Vec<CompiledStreetRule>,
    block_rules: Vec<CompiledBlockRule>,
    strict_regions: bool,
}

impl GeoClassifier {
    pub fn new() -> Self {
        Self::with_rules(STREET_RULES, BLOCK_RULES)
    }

    pub fn with_rules(street_rules: &[StreetRule], block_rules: &[BlockRule]) -> Self {
        let street_rules = street_rules
            .iter()
            .map(|r| CompiledStreetRule {
                town: r.town.to_lowercase(),
                planning_area: r.planning_area.to_string(),
                fragments: r.street_fragments.iter().map(|f| f.to_lowercase()).collect(),
            })
            .collect();

        let block_rules = block_rules
            .iter()
            .map(|r| CompiledBlockRule {
                town: r.town.to_lowercase(),
                street: r.street.to_lowercase(),
                planning_area: r.planning_area.to_string(),
                fragments: r.block_fragments.iter().map(|f| f.to_lowercase()).collect(),
            })
            .collect();

        Self {
            street_rules,
            block_rules,
            strict_regions: true,
        }
    }

    /// In strict mode a town outside the region table aborts the run;
    /// otherwise the region stays empty and the town is reported.
    pub fn with_strict_regions(mut self, strict: bool) -> Self {
        self.strict_regions = strict;
        self
    }

    pub fn classify(&self, records: &mut [Transaction]) -> Result<ClassificationSummary> {
        let mut summary = ClassificationSummary::default();

        for record in records.iter_mut() {
            record.region = self.assign_region(record, &mut summary)?;

            let (planning_area, by_block) =
                self.planning_area(&record.town, &record.street_name, &record.block);
            if by_block {
                summary.block_overrides += 1;
            }
            if planning_area != record.town {
                *summary.refined.entry(planning_area.clone()).or_default() += 1;
            }
            record.planning_area = planning_area;
        }

        for (town, count) in &summary.unmapped_towns {
            warn!(town = %town, records = count, "Town has no region mapping");
        }
        info!(
            records = records.len(),
            refined = summary.refined.values().sum::<usize>(),
            block_overrides = summary.block_overrides,
            "Classified regions and planning areas"
        );

        Ok(summary)
    }

    fn assign_region(
        &self,
        record: &Transaction,
        summary: &mut ClassificationSummary,
    ) -> Result<Option<Region>> {
        match Region::for_town(&record.town) {
            Some(region) => Ok(Some(region)),
            None if self.strict_regions => Err(ProcessingError::UnmappedRegion {
                town: record.town.clone(),
            }),
            None => {
                *summary.unmapped_towns.entry(record.town.clone()).or_default() += 1;
                Ok(None)
            }
        }
    }

    /// Planning area for one location, and whether a block rule decided it.
    ///
    /// Starts from the town; each matching street rule overwrites the result
    /// in declared order, then block rules for the record's exact street do
    /// the same. No match keeps the town.
    pub fn planning_area(&self, town: &str, street_name: &str, block: &str) -> (String, bool) {
        let town_key = town.trim().to_lowercase();
        let street_key = street_name.trim().to_lowercase();
        let block_key = block.trim().to_lowercase();

        let mut planning_area = town.to_string();

        for rule in self.street_rules.iter().filter(|r| r.town == town_key) {
            if rule.fragments.iter().any(|f| street_key.contains(f.as_str())) {
                debug!(
                    street = street_name,
                    planning_area = %rule.planning_area,
                    "Street rule matched"
                );
                planning_area = rule.planning_area.clone();
            }
        }

        let mut by_block = false;
        for rule in self
            .block_rules
            .iter()
            .filter(|r| r.town == town_key && r.street == street_key)
        {
            if rule.fragments.iter().any(|f| block_key.contains(f.as_str())) {
                planning_area = rule.planning_area.clone();
                by_block = true;
            }
        }

        (planning_area, by_block)
    }
}

impl Default for GeoClassifier {
    fn default() -> Self {
        Self::new()
    }
}
