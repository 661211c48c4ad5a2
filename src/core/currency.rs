//! Currency codes and the USD ratio abstraction

use crate::core::error::{Error, Result};
use async_trait::async_trait;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Pln,
    Eur,
    Byn,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Pln => "pln",
            Currency::Eur => "eur",
            Currency::Byn => "byn",
            Currency::Usd => "usd",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pln" => Ok(Currency::Pln),
            "eur" => Ok(Currency::Eur),
            "byn" => Ok(Currency::Byn),
            "usd" => Ok(Currency::Usd),
            _ => Err(Error::UnknownCurrency(s.to_string())),
        }
    }
}

/// Resolves the USD value of one unit of a currency.
#[async_trait]
pub trait CurrencyRatioProvider: Send + Sync {
    async fn resolve(&self, currency: Currency) -> Result<f64>;
}
