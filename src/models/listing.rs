use serde::{Deserialize, Serialize};

/// One scraped row before cleaning. Every field is opaque text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListingRecord {
    #[serde(rename = "Car Name", default)]
    pub car_name_raw: String,

    /// Present only for sources that supply the brand themselves
    #[serde(rename = "Brand", default)]
    pub brand_raw: Option<String>,

    #[serde(rename = "Price", default)]
    pub price_raw: String,

    #[serde(rename = "Year", default)]
    pub year_raw: Option<String>,

    #[serde(rename = "Mileage", default)]
    pub mileage_raw: String,

    /// Combined `price | year | mileage` text, split by the assembler
    #[serde(rename = "Details", default)]
    pub details_raw: Option<String>,

    #[serde(rename = "Dealer", default)]
    pub dealer_raw: String,
}

/// One fully typed row of the canonical table.
///
/// Field order is the column order of the persisted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedListing {
    #[serde(rename = "Car Name")]
    pub car_name: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Price")]
    pub price: u64,
    #[serde(rename = "Mileage")]
    pub mileage: u64,
    #[serde(rename = "Dealer")]
    pub dealer: String,
    #[serde(rename = "Year")]
    pub year: i32,
}

/// Ordered, read-only snapshot of cleaned listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTable {
    rows: Vec<CleanedListing>,
}

impl CanonicalTable {
    pub fn new(rows: Vec<CleanedListing>) -> Self {
        Self { rows }
    }

    /// Concatenate tables in the given order. Rows are not deduplicated.
    pub fn merge<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = CanonicalTable>,
    {
        Self {
            rows: tables.into_iter().flat_map(|table| table.rows).collect(),
        }
    }

    pub fn rows(&self) -> &[CleanedListing] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanedListing> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<CleanedListing> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a CanonicalTable {
    type Item = &'a CleanedListing;
    type IntoIter = std::slice::Iter<'a, CleanedListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
