use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Region;

/// Required columns of every raw resale file, in published order
pub const RAW_COLUMNS: [&str; 10] = [
    "month",
    "town",
    "flat_type",
    "block",
    "street_name",
    "storey_range",
    "floor_area_sqm",
    "flat_model",
    "lease_commence_date",
    "resale_price",
];

/// One row of a raw resale file. Columns outside `RAW_COLUMNS` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub month: String,
    pub town: String,
    pub flat_type: String,
    pub block: String,
    pub street_name: String,
    pub storey_range: String,
    pub floor_area_sqm: f64,
    pub flat_model: String,
    pub lease_commence_date: i32,
    pub resale_price: f64,
}

/// A cleaned resale transaction. Derived fields are filled in stage by stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Transaction {
    pub row_id: u64,
    pub date: NaiveDate,

    #[validate(range(min = 1, max = 12))]
    pub month: u32,

    pub year: i32,
    pub town: String,
    pub flat_type: String,
    pub block: String,
    pub street_name: String,
    pub storey_range: String,
    pub start_floor: i32,
    pub storey_count: i32,

    #[validate(range(exclusive_min = 0.0))]
    pub floor_area_sqm: f64,

    pub flat_model: String,
    pub lease_year: i32,

    #[validate(range(min = 0))]
    pub years_leased: i32,

    #[validate(range(exclusive_min = 0.0))]
    pub resale_price: f64,

    pub infl_adj_price: Option<f64>,
    pub region: Option<Region>,
    pub planning_area: String,
}

impl Transaction {
    pub fn location(&self) -> LocationRecord {
        LocationRecord {
            row_id: self.row_id,
            town: self.town.clone(),
            street_name: self.street_name.clone(),
            block: self.block.clone(),
            planning_area: self.planning_area.clone(),
            region: self.region,
            start_floor: self.start_floor,
        }
    }
}

/// Location detail split off the main table, joined back on `row_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub row_id: u64,
    pub town: String,
    pub street_name: String,
    pub block: String,
    pub planning_area: String,
    pub region: Option<Region>,
    pub start_floor: i32,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn transaction(town: &str, street_name: &str, block: &str) -> Transaction {
        Transaction {
            row_id: 0,
            date: NaiveDate::from_ymd_opt(2015, 3, 1).unwrap(),
            month: 3,
            year: 2015,
            town: town.to_string(),
            flat_type: "3 Room".to_string(),
            block: block.to_string(),
            street_name: street_name.to_string(),
            storey_range: "04 TO 06".to_string(),
            start_floor: 4,
            storey_count: 2,
            floor_area_sqm: 67.0,
            flat_model: "New Generation".to_string(),
            lease_year: 1980,
            years_leased: 35,
            resale_price: 300_000.0,
            infl_adj_price: None,
            region: None,
            planning_area: town.to_string(),
        }
    }
}
