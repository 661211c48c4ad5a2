use crate::core::error::{Error, Result};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};

const PROVIDER: &str = "nbrb";

#[derive(Debug, Deserialize)]
struct NbrbRate {
    #[serde(rename = "Cur_OfficialRate")]
    official_rate: f64,
}

/// National Bank of the Republic of Belarus rate endpoint.
///
/// The configured URL already names the currency; the official rate is the
/// number of BYN per one unit of that currency.
pub struct NbrbProvider {
    client: reqwest::Client,
    url: String,
}

impl NbrbProvider {
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        NbrbProvider {
            client,
            url: url.to_string(),
        }
    }

    #[instrument(skip(self))]
    pub async fn official_rate(&self) -> Result<f64> {
        let mut url = Url::parse(&self.url).map_err(|e| Error::provider(PROVIDER, e))?;
        url.query_pairs_mut().append_pair("parammode", "2");
        debug!("Requesting official rate from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("Request error: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::provider(
                PROVIDER,
                format!("HTTP error: {}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::provider(PROVIDER, e))?;
        let data: NbrbRate = serde_json::from_str(&text)
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to parse JSON response: {e}")))?;
        Ok(data.official_rate)
    }
}
