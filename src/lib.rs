//! Supercar listing analytics: scrape marketplace listings, normalize them
//! into one typed table, and derive dashboard views from it.

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod scrapers;
pub mod storage;
pub mod utils;

pub use error::{PipelineError, Result};
