use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::models::{
    CanonicalTable, CleanedListing, RawListingRecord, COL_BRAND, COL_CAR_NAME, COL_DEALER,
    COL_DETAILS, COL_MILEAGE, COL_PRICE, COL_YEAR,
};
use crate::storage::TableStore;

/// Header of the canonical table, in column order
pub const TABLE_HEADER: [&str; 6] = [COL_CAR_NAME, COL_BRAND, COL_PRICE, COL_MILEAGE, COL_DEALER, COL_YEAR];

/// Header written for raw collector output
pub const RAW_HEADER: [&str; 7] = [
    COL_CAR_NAME, COL_BRAND, COL_PRICE, COL_YEAR, COL_MILEAGE, COL_DETAILS, COL_DEALER,
];

/// Comma-separated files with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvStorage;

impl CsvStorage {
    pub fn new() -> Self {
        Self
    }

    /// Deserialize every row. Header names are trimmed; short rows are
    /// padded with empty fields, which read back as missing values.
    pub fn read_rows<T, R>(reader: R, trim: Trim) -> csv::Result<Vec<T>>
    where
        T: DeserializeOwned,
        R: Read,
    {
        let mut reader = ReaderBuilder::new().trim(trim).flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let mut record = record?;
            if record.len() < headers.len() {
                warn!("Padding short row ({} of {} fields)", record.len(), headers.len());
                while record.len() < headers.len() {
                    record.push_field("");
                }
            }
            rows.push(record.deserialize(Some(&headers))?);
        }
        Ok(rows)
    }

    /// Serialize rows under an explicit header, so empty tables keep it too
    pub fn write_rows<T, W>(writer: W, header: &[&str], rows: &[T]) -> csv::Result<()>
    where
        T: Serialize,
        W: Write,
    {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn open(path: &Path) -> Result<File> {
        if !path.exists() {
            return Err(PipelineError::MissingSource {
                path: path.to_path_buf(),
            });
        }
        Ok(File::open(path)?)
    }

    fn read_file<T: DeserializeOwned>(path: &Path, trim: Trim) -> Result<Vec<T>> {
        let file = Self::open(path)?;
        Self::read_rows(file, trim).map_err(|source| PipelineError::ReadSource {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Self::write_rows(file, header, rows).map_err(|source| PipelineError::WriteTable {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the canonical table for a dashboard view.
    ///
    /// A missing file yields an empty table instead of an error; other
    /// failures still propagate.
    pub fn load_table_or_empty(&self, path: &Path) -> Result<CanonicalTable> {
        match self.load_table(path) {
            Err(PipelineError::MissingSource { path }) => {
                warn!("No table at {}, dependent views are disabled", path.display());
                Ok(CanonicalTable::default())
            }
            other => other,
        }
    }
}

impl TableStore for CsvStorage {
    fn load_raw(&self, path: &Path) -> Result<Vec<RawListingRecord>> {
        let records: Vec<RawListingRecord> = Self::read_file(path, Trim::Headers)?;
        info!("Loaded {} raw records from {}", records.len(), path.display());
        Ok(records)
    }

    fn save_raw(&self, path: &Path, records: &[RawListingRecord]) -> Result<()> {
        Self::write_file(path, &RAW_HEADER, records)?;
        info!("Saved {} raw records to {}", records.len(), path.display());
        Ok(())
    }

    fn load_table(&self, path: &Path) -> Result<CanonicalTable> {
        let rows: Vec<CleanedListing> = Self::read_file(path, Trim::All)?;
        info!("Loaded {} listings from {}", rows.len(), path.display());
        Ok(CanonicalTable::new(rows))
    }

    fn save_table(&self, path: &Path, table: &CanonicalTable) -> Result<()> {
        Self::write_file(path, &TABLE_HEADER, table.rows())?;
        info!("Saved {} listings to {}", table.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn raw_headers_are_trimmed_and_missing_columns_absent() {
        let data = " Car Name ,Price , Mileage,Dealer\n2019 FERRARI 488,\"$250,000\",\"10,000 mi\",\n";
        let rows: Vec<RawListingRecord> = CsvStorage::read_rows(data.as_bytes(), Trim::Headers).unwrap();

        assert_eq!(
            rows,
            vec![RawListingRecord {
                car_name_raw: "2019 FERRARI 488".to_string(),
                price_raw: "$250,000".to_string(),
                mileage_raw: "10,000 mi".to_string(),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn short_rows_are_tolerated() {
        let data = "Car Name,Brand,Price\nBentley Bentayga,bentley\n";
        let rows: Vec<RawListingRecord> = CsvStorage::read_rows(data.as_bytes(), Trim::Headers).unwrap();

        assert_eq!(rows[0].brand_raw.as_deref(), Some("bentley"));
        assert_eq!(rows[0].price_raw, "");
    }

    #[test]
    fn truncated_row_does_not_fail_the_file() {
        let data = "Car Name,Price,Year,Mileage,Dealer\n\
                    2019 Ferrari 488 Pista,\"$300,000\",2019,900,Dealer One\n\
                    Audi R8\n";
        let rows: Vec<RawListingRecord> = CsvStorage::read_rows(data.as_bytes(), Trim::Headers).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].car_name_raw, "Audi R8");
        assert_eq!(rows[1].year_raw, None);
        assert_eq!(rows[1].dealer_raw, "");
    }

    #[test]
    fn table_is_written_in_fixed_column_order() {
        let table = CanonicalTable::new(vec![CleanedListing {
            car_name: "FERRARI".to_string(),
            brand: "Ferrari".to_string(),
            price: 250_000,
            mileage: 10_000,
            dealer: "Unknown".to_string(),
            year: 2019,
        }]);

        let mut out = Vec::new();
        CsvStorage::write_rows(&mut out, &TABLE_HEADER, table.rows()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Car Name,Brand,Price,Mileage,Dealer,Year\nFERRARI,Ferrari,250000,10000,Unknown,2019\n"
        );
    }

    #[test]
    fn empty_table_keeps_header() {
        let mut out = Vec::new();
        CsvStorage::write_rows::<CleanedListing, _>(&mut out, &TABLE_HEADER, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Car Name,Brand,Price,Mileage,Dealer,Year\n");
    }

    #[test]
    fn missing_source_is_reported() {
        let path = std::env::temp_dir().join("supercar-analytics-does-not-exist.csv");
        let err = CsvStorage::new().load_raw(&path).unwrap_err();
        assert!(matches!(err, PipelineError::MissingSource { .. }));
    }

    #[test]
    fn missing_table_loads_empty_for_dashboards() {
        let path = std::env::temp_dir().join("supercar-analytics-no-table.csv");
        let table = CsvStorage::new().load_table_or_empty(&path).unwrap();
        assert!(table.is_empty());
    }
}
