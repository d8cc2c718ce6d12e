//! Listing normalization: field parsing, brand resolution, missing-value
//! fill and table assembly.

pub mod assemble;
pub mod brand;
pub mod impute;
pub mod run;

pub use assemble::{assemble, assemble_all, SourceBatch};
pub use brand::{BrandVocabulary, DEFAULT_BRANDS, DEFAULT_VOCABULARY};
pub use impute::{fill_category, impute_mean, is_missing_category, truncated_mean, ImputedColumn};
pub use run::clean_sources;
