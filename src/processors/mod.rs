pub mod geo_classifier;
pub mod inflation_adjuster;
pub mod normalizer;
pub mod pipeline;
pub mod planning_rules;
pub mod quality_checker;
pub mod storey_parser;

pub use geo_classifier::{ClassificationSummary, GeoClassifier};
pub use inflation_adjuster::{InflationAdjuster, InflationSettings};
pub use normalizer::{FieldNormalizer, NormalizedTable};
pub use pipeline::{Pipeline, PipelineOutput, Stage};
pub use planning_rules::{BlockRule, StreetRule, BLOCK_RULES, STREET_RULES};
pub use quality_checker::{QualityChecker, QualityReport, QualityViolation, ViolationType};
pub use storey_parser::{parse_storey_range, StoreyRangeParser, StoreySpan};
