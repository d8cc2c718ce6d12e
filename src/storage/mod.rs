use std::path::Path;

use crate::error::Result;
use crate::models::{CanonicalTable, RawListingRecord};

mod csv_store;
pub use csv_store::CsvStorage;

/// Persistence for raw collector output and the canonical table
pub trait TableStore {
    fn load_raw(&self, path: &Path) -> Result<Vec<RawListingRecord>>;
    fn save_raw(&self, path: &Path, records: &[RawListingRecord]) -> Result<()>;
    fn load_table(&self, path: &Path) -> Result<CanonicalTable>;
    fn save_table(&self, path: &Path, table: &CanonicalTable) -> Result<()>;
}
