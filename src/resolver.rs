//! Normalizes both upstream rate providers into one convention: the USD
//! value of one unit of the source currency.
//!
//! Frankfurter already answers in that convention. NBRB answers with BYN per
//! one USD, so its rate is inverted. Every call is a live request.

use crate::core::currency::{Currency, CurrencyRatioProvider};
use crate::core::error::{Error, Result};
use crate::providers::frankfurter::FrankfurterProvider;
use crate::providers::nbrb::NbrbProvider;
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Frankfurter,
    NationalBank,
}

/// Static routing table. USD has no route since it is the target.
pub fn route(currency: Currency) -> Option<Route> {
    match currency {
        Currency::Pln | Currency::Eur => Some(Route::Frankfurter),
        Currency::Byn => Some(Route::NationalBank),
        Currency::Usd => None,
    }
}

pub struct CurrencyRatioResolver {
    frankfurter: FrankfurterProvider,
    nbrb: NbrbProvider,
}

impl CurrencyRatioResolver {
    pub fn new(frankfurter: FrankfurterProvider, nbrb: NbrbProvider) -> Self {
        CurrencyRatioResolver { frankfurter, nbrb }
    }

    pub async fn resolve_code(&self, code: &str) -> Result<f64> {
        self.resolve(code.parse()?).await
    }
}

#[async_trait]
impl CurrencyRatioProvider for CurrencyRatioResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, currency: Currency) -> Result<f64> {
        let ratio = match route(currency) {
            Some(Route::Frankfurter) => self.frankfurter.usd_rate(currency.code()).await?,
            Some(Route::NationalBank) => {
                let rate = self.nbrb.official_rate().await?;
                if rate <= 0.0 {
                    return Err(Error::provider(
                        "nbrb",
                        format!("Official rate {rate} cannot be inverted"),
                    ));
                }
                1.0 / rate
            }
            None => return Err(Error::UnknownCurrency(currency.code().to_string())),
        };
        debug!(ratio, "Resolved USD ratio");
        Ok(ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver(server: &MockServer) -> CurrencyRatioResolver {
        let client = reqwest::Client::new();
        CurrencyRatioResolver::new(
            FrankfurterProvider::new(client.clone(), &format!("{}/latest", server.uri())),
            NbrbProvider::new(client, &format!("{}/exrates/rates/USD", server.uri())),
        )
    }

    async fn mount_frankfurter(server: &MockServer, from: &str, usd: f64) {
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", from))
            .and(query_param("to", "usd"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#"{{"rates": {{"USD": {usd}}}}}"#)),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_resolve_pln_returns_rate_unmodified() {
        let server = MockServer::start().await;
        mount_frankfurter(&server, "pln", 0.2512).await;

        let ratio = resolver(&server).resolve(Currency::Pln).await.unwrap();
        assert_eq!(ratio, 0.2512);
    }

    #[tokio::test]
    async fn test_resolve_eur_returns_rate_unmodified() {
        let server = MockServer::start().await;
        mount_frankfurter(&server, "eur", 1.0467).await;

        let ratio = resolver(&server).resolve_code("EUR").await.unwrap();
        assert_eq!(ratio, 1.0467);
    }

    #[tokio::test]
    async fn test_resolve_byn_inverts_official_rate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exrates/rates/USD"))
            .and(query_param("parammode", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"Cur_OfficialRate": 3.2615}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ratio = resolver(&server).resolve(Currency::Byn).await.unwrap();
        assert_eq!(ratio, 1.0 / 3.2615);
    }

    #[tokio::test]
    async fn test_resolve_is_never_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rates": {"USD": 0.25}}"#))
            .expect(2)
            .mount(&server)
            .await;

        let resolver = resolver(&server);
        resolver.resolve(Currency::Pln).await.unwrap();
        resolver.resolve(Currency::Pln).await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_zero_official_rate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exrates/rates/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Cur_OfficialRate": 0}"#))
            .mount(&server)
            .await;

        let err = resolver(&server).resolve(Currency::Byn).await.unwrap_err();
        assert!(matches!(err, Error::ProviderUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_resolve_usd_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = resolver(&server).resolve(Currency::Usd).await.unwrap_err();
        assert!(matches!(err, Error::UnknownCurrency(ref code) if code == "usd"));
    }

    #[tokio::test]
    async fn test_resolve_unparseable_code() {
        let server = MockServer::start().await;
        let err = resolver(&server).resolve_code("gbp").await.unwrap_err();
        assert!(matches!(err, Error::UnknownCurrency(ref code) if code == "gbp"));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = resolver(&server).resolve(Currency::Eur).await.unwrap_err();
        assert!(matches!(err, Error::ProviderUnavailable { ref provider, .. } if provider == "frankfurter"));
    }

    #[test]
    fn test_routing_table() {
        assert_eq!(route(Currency::Pln), Some(Route::Frankfurter));
        assert_eq!(route(Currency::Eur), Some(Route::Frankfurter));
        assert_eq!(route(Currency::Byn), Some(Route::NationalBank));
        assert_eq!(route(Currency::Usd), None);
    }
}
