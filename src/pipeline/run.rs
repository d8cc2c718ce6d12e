use std::path::Path;
use tracing::info;

use crate::config::SourceSettings;
use crate::error::Result;
use crate::models::CanonicalTable;
use crate::storage::TableStore;

use super::assemble::{assemble_all, SourceBatch};
use super::brand::BrandVocabulary;

/// Load every source, clean each batch, concatenate in source order and
/// persist the result.
///
/// Any missing source aborts the run before anything is written.
pub fn clean_sources<S: TableStore>(
    store: &S,
    sources: &[SourceSettings],
    vocabulary: &BrandVocabulary,
    output: &Path,
) -> Result<CanonicalTable> {
    let batches = sources
        .iter()
        .map(|source| {
            let records = store.load_raw(&source.path)?;
            Ok(SourceBatch::new(source.name.clone(), source.variant, records))
        })
        .collect::<Result<Vec<_>>>()?;

    let table = assemble_all(&batches, vocabulary);
    store.save_table(output, &table)?;

    info!(
        "Cleaned {} sources into {} listings",
        batches.len(),
        table.len()
    );
    Ok(table)
}
