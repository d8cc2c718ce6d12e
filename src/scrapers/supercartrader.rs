use anyhow::Result;
use async_trait::async_trait;
use scraper::Html;
use url::Url;

use crate::models::{RawListingRecord, RawSchemaVariant};
use crate::scrapers::{select_texts, ListingScraper};

/// supercartrader.com search results.
///
/// The site has no brand field, so the search term is recorded as the brand.
/// Price, year and mileage share one `price | year | mileage` element.
pub struct SupercarTraderScraper;

#[async_trait]
impl ListingScraper for SupercarTraderScraper {
    fn site_key(&self) -> &'static str {
        "supercartrader"
    }

    fn variant(&self) -> RawSchemaVariant {
        RawSchemaVariant::SeparateBrand
    }

    fn page_url(&self, base_url: &str, query: &str, page: u32) -> Result<Url> {
        let mut url = Url::parse(base_url)?.join("/products")?;
        url.query_pairs_mut()
            .append_pair("search", query)
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn parse_page(&self, html: &str, query: &str) -> Result<Vec<RawListingRecord>> {
        let document = Html::parse_document(html);

        let names = select_texts(&document, ".product-title")?;
        let dealers = select_texts(&document, ".product-user")?;
        let details = select_texts(&document, ".price")?;

        Ok(names
            .into_iter()
            .enumerate()
            .map(|(i, name)| RawListingRecord {
                car_name_raw: name,
                brand_raw: Some(query.to_string()),
                details_raw: details.get(i).cloned(),
                dealer_raw: dealers.get(i).cloned().unwrap_or_default(),
                ..Default::default()
            })
            .collect())
    }
}
