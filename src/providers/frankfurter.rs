use crate::core::error::{Error, Result};
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

const PROVIDER: &str = "frankfurter";

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    rates: HashMap<String, f64>,
}

/// Generic rate lookup answering `{rates: {USD: <ratio>}}` for `?from=<code>&to=usd`.
pub struct FrankfurterProvider {
    client: reqwest::Client,
    url: String,
}

impl FrankfurterProvider {
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        FrankfurterProvider {
            client,
            url: url.to_string(),
        }
    }

    /// USD value of one unit of `from`, exactly as reported.
    #[instrument(skip(self))]
    pub async fn usd_rate(&self, from: &str) -> Result<f64> {
        let mut url = Url::parse(&self.url).map_err(|e| Error::provider(PROVIDER, e))?;
        url.query_pairs_mut()
            .append_pair("from", from)
            .append_pair("to", "usd");
        debug!("Requesting currency rate from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("Request error: {e} for {from}")))?;

        if !response.status().is_success() {
            return Err(Error::provider(
                PROVIDER,
                format!("HTTP error: {} for {from}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::provider(PROVIDER, e))?;
        let data: FrankfurterResponse = serde_json::from_str(&text).map_err(|e| {
            Error::provider(PROVIDER, format!("Failed to parse JSON response for {from}: {e}"))
        })?;

        data.rates
            .get("USD")
            .copied()
            .ok_or_else(|| Error::provider(PROVIDER, format!("No USD rate found for {from}")))
    }
}
