use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Central,
    East,
    North,
    #[serde(rename = "North-East")]
    NorthEast,
    West,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Central => "Central",
            Region::East => "East",
            Region::North => "North",
            Region::NorthEast => "North-East",
            Region::West => "West",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        REGIONS
            .iter()
            .copied()
            .find(|region| region.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Region of a (title-cased) town, `None` when the town is not in the table
    pub fn for_town(town: &str) -> Option<Self> {
        let town = town.trim();
        TOWN_REGIONS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(town))
            .map(|(_, region)| *region)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const REGIONS: [Region; 5] = [
    Region::Central,
    Region::East,
    Region::North,
    Region::NorthEast,
    Region::West,
];

/// Every HDB town that appears in the resale records
pub const TOWN_REGIONS: &[(&str, Region)] = &[
    ("Bishan", Region::Central),
    ("Bukit Merah", Region::Central),
    ("Bukit Timah", Region::Central),
    ("Central Area", Region::Central),
    ("Geylang", Region::Central),
    ("Kallang/Whampoa", Region::Central),
    ("Marine Parade", Region::Central),
    ("Queenstown", Region::Central),
    ("Toa Payoh", Region::Central),
    ("Bedok", Region::East),
    ("Pasir Ris", Region::East),
    ("Tampines", Region::East),
    ("Lim Chu Kang", Region::North),
    ("Sembawang", Region::North),
    ("Woodlands", Region::North),
    ("Yishun", Region::North),
    ("Ang Mo Kio", Region::NorthEast),
    ("Hougang", Region::NorthEast),
    ("Punggol", Region::NorthEast),
    ("Sengkang", Region::NorthEast),
    ("Serangoon", Region::NorthEast),
    ("Bukit Batok", Region::West),
    ("Bukit Panjang", Region::West),
    ("Choa Chu Kang", Region::West),
    ("Clementi", Region::West),
    ("Jurong East", Region::West),
    ("Jurong West", Region::West),
    ("Tengah", Region::West),
];
