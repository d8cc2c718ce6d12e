use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw column layout produced by a collector.
///
/// `EmbeddedBrand` sources carry no brand column: the brand is resolved from
/// the car name and the model year is embedded in it. `SeparateBrand` sources
/// supply the brand directly, plus either a combined `price | year | mileage`
/// details field or separate columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawSchemaVariant {
    EmbeddedBrand,
    SeparateBrand,
}

impl RawSchemaVariant {
    pub fn key(&self) -> &'static str {
        match self {
            RawSchemaVariant::EmbeddedBrand => "embedded_brand",
            RawSchemaVariant::SeparateBrand => "separate_brand",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "embedded_brand" | "embedded-brand" => Some(RawSchemaVariant::EmbeddedBrand),
            "separate_brand" | "separate-brand" => Some(RawSchemaVariant::SeparateBrand),
            _ => None,
        }
    }
}

impl fmt::Display for RawSchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
