use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

pub fn create_client(user_agent: &str) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(25))
        .cookie_store(true)
        .build()?;

    Ok(client)
}

/// GET `url`, retrying failures and non-success statuses with exponential
/// backoff starting at `base_delay`.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    max_retries: u32,
    base_delay: Duration,
) -> Result<Response> {
    let max_retries = max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_retries {
        match client.get(url).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    return Ok(response);
                } else {
                    let status = response.status();
                    warn!("HTTP error {}: {}", status, url);
                    last_error = Some(anyhow::anyhow!("HTTP error: {}", status));
                }
            }
            Err(e) => {
                error!("Request failed for {}: {}", url, e);
                last_error = Some(e.into());
            }
        }

        attempts += 1;
        if attempts < max_retries {
            let delay = backoff_delay(base_delay, attempts);
            warn!("Retrying in {:?}... (attempt {}/{})", delay, attempts + 1, max_retries);
            sleep(delay).await;
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Max retries exceeded")))
        .context(format!("Failed to fetch {} after {} attempts", url, max_retries))
}

/// `base_delay * 2^(attempt - 1)`, saturating instead of overflowing
fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    2u32.checked_pow(attempt.saturating_sub(1))
        .and_then(|factor| base_delay.checked_mul(factor))
        .unwrap_or(Duration::MAX)
}
