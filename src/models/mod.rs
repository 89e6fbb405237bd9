pub mod inflation;
pub mod region;
pub mod transaction;

pub use inflation::{IndexEntry, InflationIndex};
pub use region::{Region, REGIONS, TOWN_REGIONS};
pub use transaction::{LocationRecord, RawTransaction, Transaction, RAW_COLUMNS};
