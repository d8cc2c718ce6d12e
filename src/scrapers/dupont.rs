use anyhow::Result;
use async_trait::async_trait;
use scraper::Html;
use url::Url;

use crate::models::{RawListingRecord, RawSchemaVariant};
use crate::scrapers::{select_texts, ListingScraper};

/// dupontregistry.com brand results. Titles carry the model year.
pub struct DupontScraper;

#[async_trait]
impl ListingScraper for DupontScraper {
    fn site_key(&self) -> &'static str {
        "dupont"
    }

    fn variant(&self) -> RawSchemaVariant {
        RawSchemaVariant::EmbeddedBrand
    }

    fn page_url(&self, base_url: &str, query: &str, page: u32) -> Result<Url> {
        let mut url = Url::parse(base_url)?;
        let page_segment = format!("filter:page_start={}", page);
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL {} cannot have a path", base_url))?
            .pop_if_empty()
            .extend(["autos", "results", query, page_segment.as_str()]);
        Ok(url)
    }

    fn parse_page(&self, html: &str, _query: &str) -> Result<Vec<RawListingRecord>> {
        let document = Html::parse_document(html);

        let names = select_texts(&document, ".item-title")?;
        let prices = select_texts(&document, ".item-price")?;
        let mileages = select_texts(&document, ".item-mileage")?;
        let dealers = select_texts(&document, ".item-dealer")?;

        Ok(names
            .into_iter()
            .enumerate()
            .map(|(i, name)| RawListingRecord {
                car_name_raw: name,
                price_raw: prices.get(i).cloned().unwrap_or_default(),
                mileage_raw: mileages.get(i).cloned().unwrap_or_default(),
                dealer_raw: dealers.get(i).cloned().unwrap_or_default(),
                ..Default::default()
            })
            .collect())
    }
}
