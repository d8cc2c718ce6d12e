//! Read-only views over the canonical table for dashboards.

pub mod filter;
pub mod views;

pub use filter::ListingFilter;
pub use views::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CanonicalTable;

pub const DEFAULT_BINS: usize = 50;

/// Every dashboard view for one filtered selection.
///
/// Views that need rows are `None` (or empty) when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub filter: ListingFilter,
    pub year_bounds: Option<(i32, i32)>,
    pub price_bounds: Option<(u64, u64)>,
    pub price_distribution: Option<Distribution>,
    pub mileage_distribution: Option<Distribution>,
    pub mean_price_by_brand: Vec<GroupMean>,
    pub mean_price_by_dealer: Vec<GroupMean>,
    pub count_by_brand: Vec<GroupCount>,
    pub count_by_dealer: Vec<GroupCount>,
}

impl DashboardReport {
    pub fn build(table: &CanonicalTable, filter: &ListingFilter, bins: usize) -> Self {
        let filtered = filter.apply(table);

        Self {
            generated_at: Utc::now(),
            total_rows: table.len(),
            filtered_rows: filtered.len(),
            filter: filter.clone(),
            // Bounds describe the whole table so a UI can size its sliders
            year_bounds: year_bounds(table),
            price_bounds: price_bounds(table),
            price_distribution: price_distribution(&filtered, bins),
            mileage_distribution: mileage_distribution(&filtered, bins),
            mean_price_by_brand: mean_price_by_brand(&filtered),
            mean_price_by_dealer: mean_price_by_dealer(&filtered),
            count_by_brand: count_by_brand(&filtered),
            count_by_dealer: count_by_dealer(&filtered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CleanedListing;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_table_disables_views() {
        let report = DashboardReport::build(&CanonicalTable::default(), &ListingFilter::default(), 10);
        assert_eq!(report.total_rows, 0);
        assert!(report.price_distribution.is_none());
        assert!(report.year_bounds.is_none());
        assert!(report.count_by_brand.is_empty());
    }

    #[test]
    fn views_follow_the_filter() {
        let table = CanonicalTable::new(vec![
            CleanedListing {
                car_name: "FERRARI".to_string(),
                brand: "Ferrari".to_string(),
                price: 300,
                mileage: 1,
                dealer: "A".to_string(),
                year: 2020,
            },
            CleanedListing {
                car_name: "AUDI R".to_string(),
                brand: "Audi".to_string(),
                price: 100,
                mileage: 2,
                dealer: "B".to_string(),
                year: 2010,
            },
        ]);
        let filter = ListingFilter {
            brands: vec!["Audi".to_string()],
            ..Default::default()
        };

        let report = DashboardReport::build(&table, &filter, 5);

        assert_eq!(report.filtered_rows, 1);
        assert_eq!(report.year_bounds, Some((2010, 2020)));
        assert_eq!(report.count_by_brand.len(), 1);
        assert_eq!(report.price_distribution.as_ref().unwrap().max, 100);
        assert!(serde_json::to_string(&report).is_ok());
    }
}
