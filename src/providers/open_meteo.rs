use crate::core::error::{Error, Result};
use crate::core::weather::{WeatherProvider, WeatherReading};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};

const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,sunrise,sunset";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct Daily {
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
}

pub struct OpenMeteoProvider {
    client: reqwest::Client,
    url: String,
}

impl OpenMeteoProvider {
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        OpenMeteoProvider {
            client,
            url: url.to_string(),
        }
    }
}

fn first<T: Clone>(values: &[T], name: &str) -> Result<T> {
    values
        .first()
        .cloned()
        .ok_or_else(|| Error::Weather(format!("No {name} value in forecast")))
}

fn number(value: f64, name: &str) -> Result<serde_json::Number> {
    serde_json::Number::from_f64(value)
        .ok_or_else(|| Error::Weather(format!("Non-finite {name} value in forecast")))
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn daily(&self, latitude: f64, longitude: f64) -> Result<WeatherReading> {
        let mut url = Url::parse(&self.url).map_err(|e| Error::Weather(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("daily", DAILY_VARIABLES)
            .append_pair("timezone", "auto")
            .append_pair("forecast_days", "1");
        debug!("Requesting forecast from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Weather(format!("Request error: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::Weather(format!("HTTP error: {}", response.status())));
        }

        let data: ForecastResponse = response
            .json()
            .await
            .map_err(|e| Error::Weather(format!("Failed to parse forecast: {e}")))?;
        let daily = data.daily;

        Ok(WeatherReading {
            max: number(first(&daily.temperature_2m_max, "max")?, "max")?,
            min: number(first(&daily.temperature_2m_min, "min")?, "min")?,
            sunrise: first(&daily.sunrise, "sunrise")?,
            sunset: first(&daily.sunset, "sunset")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_daily_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "52.23"))
            .and(query_param("longitude", "21.01"))
            .and(query_param("daily", DAILY_VARIABLES))
            .and(query_param("forecast_days", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "latitude": 52.23,
                    "longitude": 21.01,
                    "daily": {
                        "time": ["2025-02-23"],
                        "temperature_2m_max": [5.4],
                        "temperature_2m_min": [-1.5],
                        "sunrise": ["2025-02-23T06:41"],
                        "sunset": ["2025-02-23T17:12"]
                    }
                }"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let provider =
            OpenMeteoProvider::new(reqwest::Client::new(), &format!("{}/v1/forecast", server.uri()));
        let reading = provider.daily(52.23, 21.01).await.unwrap();
        assert_eq!(reading.max.to_string(), "5.4");
        assert_eq!(reading.min.to_string(), "-1.5");
        assert_eq!(reading.sunrise, "2025-02-23T06:41");
        assert_eq!(reading.sunset, "2025-02-23T17:12");
    }

    #[tokio::test]
    async fn test_empty_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"daily": {"temperature_2m_max": [], "temperature_2m_min": [], "sunrise": [], "sunset": []}}"#,
            ))
            .mount(&server)
            .await;

        let provider =
            OpenMeteoProvider::new(reqwest::Client::new(), &format!("{}/v1/forecast", server.uri()));
        let err = provider.daily(0.0, 0.0).await.unwrap_err();
        assert_eq!(err.to_string(), "Weather forecast failed: No max value in forecast");
    }
}
