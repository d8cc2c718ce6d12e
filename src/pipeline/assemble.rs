use tracing::info;

use crate::models::{CanonicalTable, CleanedListing, RawListingRecord, RawSchemaVariant};
use crate::parsers::{
    clean_car_name, clean_text, extract_embedded_year, non_blank, parse_mileage, parse_price,
    parse_year_prefix, split_details, strip_embedded_year, title_case,
};

use super::brand::BrandVocabulary;
use super::impute::{fill_category, impute_mean};

/// Raw records collected from one source, tagged with their layout
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub name: String,
    pub variant: RawSchemaVariant,
    pub records: Vec<RawListingRecord>,
}

impl SourceBatch {
    pub fn new(name: impl Into<String>, variant: RawSchemaVariant, records: Vec<RawListingRecord>) -> Self {
        Self {
            name: name.into(),
            variant,
            records,
        }
    }
}

/// A record after per-field parsing, before the column-wide fill
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedRow {
    car_name: String,
    brand: Option<String>,
    price: Option<u64>,
    mileage: Option<u64>,
    year: Option<i32>,
    dealer: String,
}

fn parse_embedded_brand(record: &RawListingRecord, vocabulary: &BrandVocabulary) -> ParsedRow {
    let year = extract_embedded_year(&record.car_name_raw)
        .or_else(|| record.year_raw.as_deref().and_then(parse_year_prefix));
    let car_name = clean_car_name(&strip_embedded_year(&record.car_name_raw));
    let brand = vocabulary.resolve(&car_name).to_string();

    ParsedRow {
        brand: Some(brand),
        price: parse_price(&record.price_raw),
        mileage: parse_mileage(&record.mileage_raw),
        year,
        dealer: clean_text(&record.dealer_raw),
        car_name,
    }
}

fn parse_separate_brand(record: &RawListingRecord, vocabulary: &BrandVocabulary) -> ParsedRow {
    let details = record
        .details_raw
        .as_deref()
        .map(split_details)
        .unwrap_or_default();

    // An explicit column beats the matching part of the combined field
    let price_raw = non_blank(&record.price_raw).or(details.price.as_deref());
    let mileage_raw = non_blank(&record.mileage_raw).or(details.mileage.as_deref());
    let year_raw = record
        .year_raw
        .as_deref()
        .and_then(non_blank)
        .or(details.year.as_deref());

    let car_name = clean_car_name(&record.car_name_raw);
    // Without a supplied brand the name is resolved like any other source
    let brand = match record.brand_raw.as_deref() {
        Some(brand) => title_case(brand),
        None => vocabulary.resolve(&car_name).to_string(),
    };

    ParsedRow {
        car_name,
        brand: Some(brand),
        price: price_raw.and_then(parse_price),
        mileage: mileage_raw.and_then(parse_mileage),
        year: year_raw.and_then(parse_year_prefix),
        dealer: clean_text(&record.dealer_raw),
    }
}

fn parse_record(
    record: &RawListingRecord,
    variant: RawSchemaVariant,
    vocabulary: &BrandVocabulary,
) -> ParsedRow {
    match variant {
        RawSchemaVariant::EmbeddedBrand => parse_embedded_brand(record, vocabulary),
        RawSchemaVariant::SeparateBrand => parse_separate_brand(record, vocabulary),
    }
}

/// Clean one source batch into canonical rows.
///
/// Fields are parsed per record, then each numeric column is filled with its
/// own mean across this batch only.
pub fn assemble(batch: &SourceBatch, vocabulary: &BrandVocabulary) -> CanonicalTable {
    let parsed: Vec<ParsedRow> = batch
        .records
        .iter()
        .map(|record| parse_record(record, batch.variant, vocabulary))
        .collect();

    let prices: Vec<_> = parsed.iter().map(|row| row.price).collect();
    let mileages: Vec<_> = parsed.iter().map(|row| row.mileage).collect();
    let years: Vec<_> = parsed.iter().map(|row| row.year).collect();

    let prices = impute_mean("Price", &prices);
    let mileages = impute_mean("Mileage", &mileages);
    let years = impute_mean("Year", &years);

    let rows: Vec<CleanedListing> = parsed
        .into_iter()
        .enumerate()
        .map(|(i, row)| CleanedListing {
            brand: fill_category(row.brand.as_deref()),
            dealer: fill_category(Some(row.dealer.as_str())),
            car_name: row.car_name,
            price: prices.values[i],
            mileage: mileages.values[i],
            year: years.values[i],
        })
        .collect();

    info!(
        "Assembled {} rows from source {} ({})",
        rows.len(),
        batch.name,
        batch.variant
    );

    CanonicalTable::new(rows)
}

/// Clean every batch and concatenate the results in the given order
pub fn assemble_all<'a, I>(batches: I, vocabulary: &BrandVocabulary) -> CanonicalTable
where
    I: IntoIterator<Item = &'a SourceBatch>,
{
    CanonicalTable::merge(batches.into_iter().map(|batch| assemble(batch, vocabulary)))
}
