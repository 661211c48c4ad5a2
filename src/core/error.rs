//! Error types shared by every widget update

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Rate provider {provider} unavailable: {message}")]
    ProviderUnavailable { provider: String, message: String },

    #[error("Invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Remote API error on {endpoint}{}: {message}", status_suffix(.status))]
    RemoteApi {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Feed {url} failed: {message}")]
    Feed { url: String, message: String },

    #[error("Weather forecast failed: {0}")]
    Weather(String),

    #[error("Invalid payload in {key}: {message}")]
    Payload { key: String, message: String },
}

impl Error {
    pub(crate) fn provider(provider: &str, message: impl ToString) -> Self {
        Error::ProviderUnavailable {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn remote(endpoint: &str, status: Option<u16>, message: impl ToString) -> Self {
        Error::RemoteApi {
            endpoint: endpoint.to_string(),
            status,
            message: message.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;
