use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};
use url::Url;

use crate::config::{CollectorSettings, SiteSettings};
use crate::models::{RawListingRecord, RawSchemaVariant};
use crate::parsers::clean_text;
use crate::utils::http::fetch_with_retry;

mod dupont;
mod supercartrader;

pub use dupont::DupontScraper;
pub use supercartrader::SupercarTraderScraper;

/// Pacing for sequential page loads
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    /// Pause between two page loads
    pub settle_delay: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl From<&CollectorSettings> for CollectOptions {
    fn from(settings: &CollectorSettings) -> Self {
        Self {
            settle_delay: Duration::from_millis(settings.settle_delay_ms),
            max_retries: settings.max_retries,
            retry_base_delay: Duration::from_millis(settings.retry_base_delay_ms),
        }
    }
}

/// A listing site paged by search term.
///
/// Each page yields one batch of raw records; an empty page ends the
/// sequence for that term.
#[async_trait]
pub trait ListingScraper: Send + Sync {
    fn site_key(&self) -> &'static str;

    /// Layout of the records `parse_page` produces
    fn variant(&self) -> RawSchemaVariant;

    fn page_url(&self, base_url: &str, query: &str, page: u32) -> Result<Url>;

    fn parse_page(&self, html: &str, query: &str) -> Result<Vec<RawListingRecord>>;

    async fn fetch_page(
        &self,
        client: &Client,
        url: &Url,
        query: &str,
        options: &CollectOptions,
    ) -> Result<Vec<RawListingRecord>> {
        let response =
            fetch_with_retry(client, url.as_str(), options.max_retries, options.retry_base_delay).await?;
        let html = response.text().await?;
        self.parse_page(&html, query)
    }

    /// Walk every query's pages in order, one request at a time.
    ///
    /// A failed page ends its query; the other queries still run.
    async fn collect(
        &self,
        client: &Client,
        site: &SiteSettings,
        options: &CollectOptions,
    ) -> Result<Vec<RawListingRecord>> {
        let mut batches: Vec<Vec<RawListingRecord>> = Vec::new();
        let mut first_request = true;

        for query in &site.queries {
            for page in 1..=site.max_pages {
                let url = self.page_url(&site.base_url, query, page)?;

                if !first_request {
                    sleep(options.settle_delay).await;
                }
                first_request = false;

                match self.fetch_page(client, &url, query, options).await {
                    Ok(records) if records.is_empty() => {
                        info!("No more {} listings for {:?} after page {}", self.site_key(), query, page - 1);
                        break;
                    }
                    Ok(records) => {
                        info!("Found {} listings on {} page {} for {:?}", records.len(), self.site_key(), page, query);
                        batches.push(records);
                    }
                    Err(e) => {
                        error!("Error scraping {}: {:#}", url, e);
                        break;
                    }
                }
            }
        }

        Ok(batches.into_iter().flatten().collect())
    }
}

/// Scraper registered under `key`
pub fn scraper_for(key: &str) -> Option<Box<dyn ListingScraper>> {
    match key {
        "supercartrader" => Some(Box::new(SupercarTraderScraper)),
        "dupont" => Some(Box::new(DupontScraper)),
        _ => None,
    }
}

/// Cleaned text of every element matching `selector`, in document order
pub(crate) fn select_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(selector)
        .map_err(|_| anyhow::anyhow!("Failed to parse selector {}", selector))?;

    Ok(document
        .select(&selector)
        .map(|element| clean_text(&element.text().collect::<String>()))
        .collect())
}
