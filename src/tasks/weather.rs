use crate::core::blocks;
use crate::core::error::Result;
use crate::core::format::format_clock_time;
use crate::core::task::Task;
use crate::core::weather::{WeatherProvider, WeatherReading};
use crate::core::workspace::WorkspaceApi;
use async_trait::async_trait;
use std::sync::Arc;

pub enum WeatherInput {
    Reading(WeatherReading),
    Forecast {
        provider: Arc<dyn WeatherProvider>,
        latitude: f64,
        longitude: f64,
    },
}

/// Overwrites a fixed table row: max, min, sunrise, sunset.
pub struct WeatherTask {
    api: Arc<dyn WorkspaceApi>,
    row_id: String,
    input: WeatherInput,
}

impl WeatherTask {
    pub fn new(api: Arc<dyn WorkspaceApi>, row_id: &str, input: WeatherInput) -> Self {
        WeatherTask {
            api,
            row_id: row_id.to_string(),
            input,
        }
    }

    async fn reading(&self) -> Result<WeatherReading> {
        match &self.input {
            WeatherInput::Reading(reading) => Ok(reading.clone()),
            WeatherInput::Forecast {
                provider,
                latitude,
                longitude,
            } => provider.daily(*latitude, *longitude).await,
        }
    }
}

pub fn weather_cells(reading: &WeatherReading) -> Result<[String; 4]> {
    Ok([
        reading.max.to_string(),
        reading.min.to_string(),
        format_clock_time(&reading.sunrise)?,
        format_clock_time(&reading.sunset)?,
    ])
}

#[async_trait]
impl Task for WeatherTask {
    fn name(&self) -> &'static str {
        "weather"
    }

    async fn run(&self) -> Result<()> {
        let reading = self.reading().await?;
        let cells = weather_cells(&reading)?;
        self.api
            .update_block(&self.row_id, &blocks::table_row(&cells))
            .await
    }
}
