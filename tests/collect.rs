use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::time::Duration;

use supercar_analytics::config::SiteSettings;
use supercar_analytics::models::RawSchemaVariant;
use supercar_analytics::pipeline::{assemble, BrandVocabulary, SourceBatch};
use supercar_analytics::scrapers::{scraper_for, CollectOptions, DupontScraper, ListingScraper, SupercarTraderScraper};
use supercar_analytics::utils::http::create_client;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options() -> CollectOptions {
    CollectOptions {
        settle_delay: Duration::from_millis(0),
        max_retries: 1,
        retry_base_delay: Duration::from_millis(1),
    }
}

fn site(base_url: String, queries: &[&str], max_pages: u32) -> SiteSettings {
    SiteSettings {
        base_url,
        queries: queries.iter().map(|q| q.to_string()).collect(),
        max_pages,
        output_path: PathBuf::from("unused.csv"),
    }
}

fn trader_card(name: &str, dealer: &str, details: &str) -> String {
    format!(
        r#"<div><h3 class="product-title">{}</h3><span class="product-user">{}</span><div class="price">{}</div></div>"#,
        name, dealer, details
    )
}

#[tokio::test]
async fn pages_until_an_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("search", "ferrari"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>{}{}</body></html>",
            trader_card("2019 Ferrari 488", "Dealer A", "$250,000 | 2019 | 10,000 mi"),
            trader_card("2022 Ferrari 296 GTB", "Dealer B", "$330,000 | 2022 | 900 mi"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("search", "ferrari"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>{}</body></html>",
            trader_card("Ferrari Enzo", "Dealer C", "Call for price | 2003 | 1,000 mi"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("search", "ferrari"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client("test-agent").unwrap();
    let records = SupercarTraderScraper
        .collect(&client, &site(server.uri(), &["ferrari"], 8), &options())
        .await
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.car_name_raw.as_str()).collect();
    assert_eq!(names, vec!["2019 Ferrari 488", "2022 Ferrari 296 GTB", "Ferrari Enzo"]);

    let batch = SourceBatch::new("supercartrader", RawSchemaVariant::SeparateBrand, records);
    let table = assemble(&batch, &BrandVocabulary::default());
    assert_eq!(table.rows()[2].price, 290_000);
    assert_eq!(table.rows()[2].brand, "Ferrari");
}

#[tokio::test]
async fn stops_at_max_pages_and_continues_other_queries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/autos/results/maserati/filter:page_start=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a class="item-title">2021 Maserati MC20</a><div class="item-price">$239,000</div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/autos/results/bugatti/filter:page_start=1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client("test-agent").unwrap();
    let records = DupontScraper
        .collect(&client, &site(server.uri(), &["bugatti", "maserati"], 1), &options())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].car_name_raw, "2021 Maserati MC20");
    assert_eq!(scraper_for("dupont").unwrap().site_key(), "dupont");
}
