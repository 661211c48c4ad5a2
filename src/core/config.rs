use crate::core::error::Error;
use crate::core::format::{BirthdayRecord, MeetingRecord};
use crate::core::weather::WeatherReading;
use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

pub const DEFAULT_NOTION_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_FOOTER_MARKER: &str = "<a ";

/// API token that never shows up in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone)]
pub struct BudgetConfig {
    pub block_id: String,
    pub page_id: String,
    pub database_id: String,
    pub frankfurter_url: String,
    pub nbrb_url: String,
}

#[derive(Debug, Clone)]
pub struct MeetingConfig {
    pub database_id: String,
    pub summary_block_id: Option<String>,
    pub meetings: Vec<MeetingRecord>,
}

#[derive(Debug, Clone)]
pub struct ToDoConfig {
    pub block_id: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HabitConfig {
    pub block_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone)]
pub enum WeatherSource {
    Reading(WeatherReading),
    Forecast {
        url: String,
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub row_id: String,
    pub source: WeatherSource,
}

#[derive(Debug, Clone)]
pub struct BirthdayConfig {
    pub block_id: String,
    pub birthdays: Vec<BirthdayRecord>,
}

#[derive(Debug, Clone)]
pub struct HeadlineConfig {
    pub block_id: String,
    pub feeds: Vec<String>,
    pub footer_marker: String,
}

#[derive(Debug, Clone)]
pub struct MessageConfig {
    pub block_id: String,
    pub content: String,
}

/// Everything a run needs, read once at startup. A widget section is `None`
/// when its block/database key is absent from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub notion_token: Secret,
    pub notion_base_url: String,
    pub budget: Option<BudgetConfig>,
    pub meeting: Option<MeetingConfig>,
    pub todo: Option<ToDoConfig>,
    pub habit: Option<HabitConfig>,
    pub weather: Option<WeatherConfig>,
    pub birthday: Option<BirthdayConfig>,
    pub headline: Option<HeadlineConfig>,
    pub message: Option<MessageConfig>,
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.optional(key)
            .ok_or_else(|| anyhow!("Missing environment variable: {key}"))
    }

    fn json<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let raw = self.required(key)?;
        let value = serde_json::from_str(&raw).map_err(|e| Error::Payload {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(value)
    }

    fn number(&self, key: &str) -> Result<f64> {
        let raw = self.required(key)?;
        raw.trim()
            .parse()
            .with_context(|| format!("Invalid number in {key}: {raw}"))
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        debug!("Loading config from environment");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let budget = match env.optional("BUDGET_BLOCK") {
            Some(block_id) => Some(BudgetConfig {
                block_id,
                page_id: env.required("BUDGET_PAGE")?,
                database_id: env.required("BUDGET_DB")?,
                frankfurter_url: env.required("FRANKFURTER_URL")?,
                nbrb_url: env.required("NB_RB_URL")?,
            }),
            None => None,
        };

        let meeting = match env.optional("MEETINGS_DATABASE") {
            Some(database_id) => Some(MeetingConfig {
                database_id,
                summary_block_id: env.optional("MEETINGS_BLOCK"),
                meetings: env.json("MEETINGS")?,
            }),
            None => None,
        };

        let todo = match env.optional("TO_DOS_BLOCK") {
            Some(block_id) => Some(ToDoConfig {
                block_id,
                items: env.json("TO_DOS")?,
            }),
            None => None,
        };

        let habit = match env.optional("HABITS_BLOCK") {
            Some(block_id) => Some(HabitConfig {
                block_id,
                database_id: env.required("HABITS_DB")?,
            }),
            None => None,
        };

        let weather = match env.optional("WEATHER_ROW") {
            Some(row_id) => {
                let source = if env.optional("WEATHER").is_some() {
                    WeatherSource::Reading(env.json("WEATHER")?)
                } else {
                    WeatherSource::Forecast {
                        url: env
                            .required("OPEN_METEO_URL")
                            .context("WEATHER_ROW needs either WEATHER or OPEN_METEO_URL")?,
                        latitude: env.number("WEATHER_LATITUDE")?,
                        longitude: env.number("WEATHER_LONGITUDE")?,
                    }
                };
                Some(WeatherConfig { row_id, source })
            }
            None => None,
        };

        let birthday = match env.optional("BIRTHDAYS_BLOCK") {
            Some(block_id) => Some(BirthdayConfig {
                block_id,
                birthdays: env.json("BIRTHDAYS")?,
            }),
            None => None,
        };

        let headline = match env.optional("NEWSLETTER_BLOCK") {
            Some(block_id) => Some(HeadlineConfig {
                block_id,
                feeds: env.json("FEEDS")?,
                footer_marker: env
                    .optional("FEED_FOOTER_MARKER")
                    .unwrap_or_else(|| DEFAULT_FOOTER_MARKER.to_string()),
            }),
            None => None,
        };

        let message = match env.optional("MESSAGE_BLOCK") {
            Some(block_id) => Some(MessageConfig {
                block_id,
                content: env.required("MESSAGE")?,
            }),
            None => None,
        };

        let config = AppConfig {
            notion_token: Secret(env.required("NOTION_TOKEN")?),
            notion_base_url: env
                .optional("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_URL.to_string()),
            budget,
            meeting,
            todo,
            habit,
            weather,
            birthday,
            headline,
            message,
        };
        debug!("Successfully loaded config");
        Ok(config)
    }
}
