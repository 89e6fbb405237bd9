//! Planning-area refinement rules for towns that span several planning areas.
//!
//! Rules are evaluated top to bottom and every matching rule overwrites the
//! previous result, so when a street matches fragments of more than one area
//! the rule declared last wins. Keep more specific fragments below the
//! general ones they overlap with (`Tg Pagar Plaza` after `Tg Pagar`).

/// Street-level rule: inside `town`, a street name containing any fragment
/// (case-insensitive) belongs to `planning_area`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreetRule {
    pub town: &'static str,
    pub planning_area: &'static str,
    pub street_fragments: &'static [&'static str],
}

/// Block-level override for one street of one town. Applied after the street
/// rules and only to records on exactly that street.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRule {
    pub town: &'static str,
    pub street: &'static str,
    pub planning_area: &'static str,
    pub block_fragments: &'static [&'static str],
}

pub const STREET_RULES: &[StreetRule] = &[
    StreetRule {
        town: "Central Area",
        planning_area: "Outram",
        street_fragments: &[
            "Smith St",
            "Sago Lane",
            "Banda St",
            "Chin Swee Rd",
            "Jln Kukoh",
            "New Market Rd",
            "Upp Cross St",
            "Park Cres",
            "Cantonment Rd",
            "Kreta Ayer Rd",
            "Tg Pagar",
        ],
    },
    StreetRule {
        town: "Central Area",
        planning_area: "Rochor",
        street_fragments: &[
            "Jln Berseh",
            "Queen St",
            "Rowell Rd",
            "Selegie Rd",
            "Waterloo St",
            "Short St",
            "Veerasamy Rd",
            "Kelantan Rd",
            "Buffalo Rd",
            "Jln Kubor",
            "Rochor Rd",
        ],
    },
    StreetRule {
        town: "Central Area",
        planning_area: "Downtown Core",
        street_fragments: &["Tg Pagar Plaza"],
    },
    StreetRule {
        town: "Kallang/Whampoa",
        planning_area: "Kallang",
        street_fragments: &[
            "Bendemeer Rd",
            "Boon Keng Rd",
            "Geylang Bahru",
            "Kallang Bahru",
            "Jln Bahagia",
            "Jln Tenteram",
            "Lor Limau",
            "St. George's",
            "Towner Rd",
            "Mcnair Rd",
            "Beach Rd",
        ],
    },
    StreetRule {
        town: "Kallang/Whampoa",
        planning_area: "Novena",
        street_fragments: &["Whampoa", "Jln Dusun", "Balestier Rd", "Kent Rd"],
    },
    StreetRule {
        town: "Kallang/Whampoa",
        planning_area: "Rochor",
        street_fragments: &[
            "French Rd",
            "Jln Besar",
            "Kitchener Rd",
            "Rangoon Rd",
            "Owen Rd",
            "Farrer Pk Rd",
            "Race Course Rd",
            "Northumberland Rd",
        ],
    },
];

pub const BLOCK_RULES: &[BlockRule] = &[
    BlockRule {
        town: "Kallang/Whampoa",
        street: "Beach Rd",
        planning_area: "Rochor",
        block_fragments: &["1", "2", "3", "4", "5", "6", "7", "8"],
    },
    BlockRule {
        town: "Kallang/Whampoa",
        street: "Beach Rd",
        planning_area: "Kallang",
        block_fragments: &["15", "16", "17"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    #[test]
    fn test_rule_towns_have_regions() {
        for rule in STREET_RULES {
            assert!(Region::for_town(rule.town).is_some(), "{}", rule.town);
        }
        for rule in BLOCK_RULES {
            assert!(Region::for_town(rule.town).is_some(), "{}", rule.town);
        }
    }

    #[test]
    fn test_rules_have_fragments() {
        assert!(STREET_RULES.iter().all(|r| !r.street_fragments.is_empty()));
        assert!(BLOCK_RULES.iter().all(|r| !r.block_fragments.is_empty()));
    }
}
