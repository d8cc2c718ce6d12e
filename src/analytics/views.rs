use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{CanonicalTable, CleanedListing};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: u64,
    /// Inclusive upper edge
    pub upper: u64,
    pub count: usize,
}

/// Summary and fixed-width histogram of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub count: usize,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Histogram over `values` with `bins` equal integer-width buckets.
///
/// Returns `None` for an empty column.
pub fn distribution(values: &[u64], bins: usize) -> Option<Distribution> {
    let min = *values.iter().min()?;
    let max = *values.iter().max()?;
    let bins = bins.max(1) as u64;
    let width = ((max - min) / bins).saturating_add(1);

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| {
            let lower = min.saturating_add(i.saturating_mul(width));
            HistogramBin {
                lower,
                upper: lower.saturating_add(width - 1),
                count: 0,
            }
        })
        .collect();

    for &value in values {
        let index = ((value - min) / width).min(bins - 1) as usize;
        histogram[index].count += 1;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    };

    Some(Distribution {
        count: values.len(),
        min,
        max,
        mean: values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64,
        median,
        bins: histogram,
    })
}

pub fn price_distribution(table: &CanonicalTable, bins: usize) -> Option<Distribution> {
    let prices: Vec<u64> = table.iter().map(|l| l.price).collect();
    distribution(&prices, bins)
}

pub fn mileage_distribution(table: &CanonicalTable, bins: usize) -> Option<Distribution> {
    let mileages: Vec<u64> = table.iter().map(|l| l.mileage).collect();
    distribution(&mileages, bins)
}

fn mean_price_by<F>(table: &CanonicalTable, key: F) -> Vec<GroupMean>
where
    F: Fn(&CleanedListing) -> &str,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for listing in table {
        let entry = groups.entry(key(listing)).or_insert((0.0, 0));
        entry.0 += listing.price as f64;
        entry.1 += 1;
    }

    let mut means: Vec<GroupMean> = groups
        .into_iter()
        .map(|(key, (sum, count))| GroupMean {
            key: key.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect();

    // Highest mean first; BTreeMap order breaks ties by key
    means.sort_by(|a, b| b.mean.partial_cmp(&a.mean).unwrap_or(Ordering::Equal));
    means
}

fn count_by<F>(table: &CanonicalTable, key: F) -> Vec<GroupCount>
where
    F: Fn(&CleanedListing) -> &str,
{
    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    for listing in table {
        *groups.entry(key(listing)).or_default() += 1;
    }

    let mut counts: Vec<GroupCount> = groups
        .into_iter()
        .map(|(key, count)| GroupCount {
            key: key.to_string(),
            count,
        })
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn mean_price_by_brand(table: &CanonicalTable) -> Vec<GroupMean> {
    mean_price_by(table, |l| l.brand.as_str())
}

pub fn mean_price_by_dealer(table: &CanonicalTable) -> Vec<GroupMean> {
    mean_price_by(table, |l| l.dealer.as_str())
}

pub fn count_by_brand(table: &CanonicalTable) -> Vec<GroupCount> {
    count_by(table, |l| l.brand.as_str())
}

pub fn count_by_dealer(table: &CanonicalTable) -> Vec<GroupCount> {
    count_by(table, |l| l.dealer.as_str())
}

pub fn year_bounds(table: &CanonicalTable) -> Option<(i32, i32)> {
    let min = table.iter().map(|l| l.year).min()?;
    let max = table.iter().map(|l| l.year).max()?;
    Some((min, max))
}

pub fn price_bounds(table: &CanonicalTable) -> Option<(u64, u64)> {
    let min = table.iter().map(|l| l.price).min()?;
    let max = table.iter().map(|l| l.price).max()?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(brand: &str, dealer: &str, price: u64, mileage: u64, year: i32) -> CleanedListing {
        CleanedListing {
            car_name: brand.to_uppercase(),
            brand: brand.to_string(),
            price,
            mileage,
            dealer: dealer.to_string(),
            year,
        }
    }

    fn table() -> CanonicalTable {
        CanonicalTable::new(vec![
            listing("Ferrari", "Prestige", 300, 10, 2019),
            listing("Porsche", "Prestige", 100, 30, 2015),
            listing("Ferrari", "Unknown", 500, 50, 2023),
            listing("Bentley", "Unknown", 200, 40, 2011),
        ])
    }

    #[test]
    fn histogram_covers_every_value() {
        let dist = distribution(&[0, 25, 26, 100], 4).unwrap();
        assert_eq!(dist.bins.len(), 4);
        assert_eq!(dist.bins.iter().map(|b| b.count).sum::<usize>(), 4);
        assert_eq!((dist.bins[0].lower, dist.bins[0].upper), (0, 25));
        assert_eq!(dist.bins[0].count, 2);
        assert!(dist.bins[3].upper >= 100);
        assert_eq!(dist.median, 25.5);
    }

    #[test]
    fn constant_column_fits_one_bin() {
        let dist = distribution(&[7, 7, 7], 10).unwrap();
        assert_eq!(dist.bins[0].count, 3);
        assert_eq!(dist.mean, 7.0);
    }

    #[test]
    fn single_bin_spans_full_range() {
        let dist = distribution(&[0, u64::MAX], 1).unwrap();
        assert_eq!(dist.bins.len(), 1);
        assert_eq!(dist.bins[0].count, 2);
        assert_eq!(dist.max, u64::MAX);
    }

    #[test]
    fn empty_column_has_no_distribution() {
        assert_eq!(distribution(&[], 5), None);
        assert_eq!(price_distribution(&CanonicalTable::default(), 5), None);
    }

    #[test]
    fn price_and_mileage_distributions() {
        let prices = price_distribution(&table(), 2).unwrap();
        assert_eq!((prices.min, prices.max, prices.mean), (100, 500, 275.0));

        let mileages = mileage_distribution(&table(), 2).unwrap();
        assert_eq!(mileages.median, 35.0);
    }

    #[test]
    fn mean_price_groups_sorted_descending() {
        let by_brand = mean_price_by_brand(&table());
        let keys: Vec<_> = by_brand.iter().map(|g| (g.key.as_str(), g.mean)).collect();
        assert_eq!(keys, vec![("Ferrari", 400.0), ("Bentley", 200.0), ("Porsche", 100.0)]);

        let by_dealer = mean_price_by_dealer(&table());
        assert_eq!(by_dealer[0].key, "Unknown");
        assert_eq!(by_dealer[0].count, 2);
    }

    #[test]
    fn counts_sorted_descending_then_by_name() {
        let counts = count_by_brand(&table());
        assert_eq!(
            counts,
            vec![
                GroupCount { key: "Ferrari".to_string(), count: 2 },
                GroupCount { key: "Bentley".to_string(), count: 1 },
                GroupCount { key: "Porsche".to_string(), count: 1 },
            ]
        );
        assert_eq!(count_by_dealer(&table()).len(), 2);
    }

    #[test]
    fn bounds() {
        assert_eq!(year_bounds(&table()), Some((2011, 2023)));
        assert_eq!(price_bounds(&table()), Some((100, 500)));
        assert_eq!(year_bounds(&CanonicalTable::default()), None);
    }
}
