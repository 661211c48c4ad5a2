pub mod core;
pub mod providers;
pub mod reconcile;
pub mod resolver;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

use crate::core::config::{AppConfig, WeatherSource};
use crate::core::{Task, WorkspaceApi};
use crate::providers::{
    feed::HttpFeedSource, frankfurter::FrankfurterProvider, nbrb::NbrbProvider,
    notion::NotionClient, open_meteo::OpenMeteoProvider,
};
use crate::resolver::CurrencyRatioResolver;
use crate::tasks::{
    BirthdayTask, BudgetTask, HabitTask, HeadlineTask, MeetingTask, MessageTask, ToDoTask,
    WeatherInput, WeatherTask,
};
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the configured widget tasks in their fixed run order, all sharing
/// one HTTP client.
pub fn build_tasks(
    config: &AppConfig,
    client: reqwest::Client,
    today: NaiveDate,
) -> Vec<Box<dyn Task>> {
    let api: Arc<dyn WorkspaceApi> = Arc::new(NotionClient::new(
        client.clone(),
        &config.notion_base_url,
        config.notion_token.expose(),
    ));
    let mut tasks: Vec<Box<dyn Task>> = Vec::new();

    if let Some(budget) = &config.budget {
        let resolver = CurrencyRatioResolver::new(
            FrankfurterProvider::new(client.clone(), &budget.frankfurter_url),
            NbrbProvider::new(client.clone(), &budget.nbrb_url),
        );
        tasks.push(Box::new(BudgetTask::new(
            Arc::clone(&api),
            Arc::new(resolver),
            budget.clone(),
        )));
    }
    if let Some(meeting) = &config.meeting {
        tasks.push(Box::new(MeetingTask::new(Arc::clone(&api), meeting.clone())));
    }
    if let Some(todo) = &config.todo {
        tasks.push(Box::new(ToDoTask::new(Arc::clone(&api), todo.clone())));
    }
    if let Some(habit) = &config.habit {
        tasks.push(Box::new(HabitTask::new(Arc::clone(&api), habit.clone(), today)));
    }
    if let Some(weather) = &config.weather {
        let input = match &weather.source {
            WeatherSource::Reading(reading) => WeatherInput::Reading(reading.clone()),
            WeatherSource::Forecast {
                url,
                latitude,
                longitude,
            } => WeatherInput::Forecast {
                provider: Arc::new(OpenMeteoProvider::new(client.clone(), url)),
                latitude: *latitude,
                longitude: *longitude,
            },
        };
        tasks.push(Box::new(WeatherTask::new(Arc::clone(&api), &weather.row_id, input)));
    }
    if let Some(birthday) = &config.birthday {
        tasks.push(Box::new(BirthdayTask::new(Arc::clone(&api), birthday.clone(), today)));
    }
    if let Some(headline) = &config.headline {
        tasks.push(Box::new(HeadlineTask::new(
            Arc::clone(&api),
            Arc::new(HttpFeedSource::new(client.clone())),
            headline.clone(),
        )));
    }
    if let Some(message) = &config.message {
        tasks.push(Box::new(MessageTask::new(Arc::clone(&api), message.clone())));
    }

    tasks
}

pub async fn run_with(config: &AppConfig, today: NaiveDate) -> Result<()> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("morning/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let tasks = build_tasks(config, client, today);
    debug!(tasks = tasks.len(), "Built widget tasks");
    if tasks.is_empty() {
        info!("No widgets configured, nothing to update");
        return Ok(());
    }

    tasks::run_all(&tasks).await?;
    info!("Dashboard updated");
    Ok(())
}

pub async fn run() -> Result<()> {
    info!("Morning dashboard update starting...");

    let config = AppConfig::from_env()?;
    debug!("Loaded config: {config:#?}");

    run_with(&config, chrono::Local::now().date_naive()).await
}
