use serde::{Deserialize, Serialize};

use crate::models::{CanonicalTable, CleanedListing};

/// Row selection for dashboard views. Empty brand or dealer sets do not restrict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub brands: Vec<String>,
    pub dealers: Vec<String>,
    /// Inclusive year bounds
    pub year_range: Option<(i32, i32)>,
    /// Inclusive price bounds
    pub price_range: Option<(u64, u64)>,
}

impl ListingFilter {
    pub fn matches(&self, listing: &CleanedListing) -> bool {
        if !self.brands.is_empty() && !self.brands.iter().any(|b| b == &listing.brand) {
            return false;
        }
        if !self.dealers.is_empty() && !self.dealers.iter().any(|d| d == &listing.dealer) {
            return false;
        }
        if let Some((lo, hi)) = self.year_range {
            if listing.year < lo || listing.year > hi {
                return false;
            }
        }
        if let Some((lo, hi)) = self.price_range {
            if listing.price < lo || listing.price > hi {
                return false;
            }
        }
        true
    }

    /// Matching rows as a new table; the source table is untouched
    pub fn apply(&self, table: &CanonicalTable) -> CanonicalTable {
        CanonicalTable::new(table.iter().filter(|l| self.matches(l)).cloned().collect())
    }
}
