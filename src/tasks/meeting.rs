use crate::core::blocks;
use crate::core::config::MeetingConfig;
use crate::core::error::Result;
use crate::core::format::{MeetingRecord, format_meetings};
use crate::core::task::Task;
use crate::core::workspace::WorkspaceApi;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

pub fn meeting_properties(meeting: &MeetingRecord) -> Value {
    json!({
        "Name": {
            "title": [{"text": {"content": meeting.title}}]
        },
        "Date": {
            "date": {"start": meeting.start_date, "end": meeting.end_date}
        }
    })
}

/// Mirrors today's meetings into a database: archives every existing row,
/// then creates one row per meeting in input order. Archive and create are
/// separate phases and a failure between them leaves the database empty.
pub struct MeetingTask {
    api: Arc<dyn WorkspaceApi>,
    config: MeetingConfig,
}

impl MeetingTask {
    pub fn new(api: Arc<dyn WorkspaceApi>, config: MeetingConfig) -> Self {
        MeetingTask { api, config }
    }
}

#[async_trait]
impl Task for MeetingTask {
    fn name(&self) -> &'static str {
        "meeting"
    }

    async fn run(&self) -> Result<()> {
        let database_id = &self.config.database_id;
        // Format up front so a bad timestamp fails before anything is archived.
        let summary = format_meetings(&self.config.meetings)?;

        let rows = self.api.query_database(database_id, None).await?;
        debug!(rows = rows.len(), "Archiving meeting rows");
        for row in &rows {
            self.api.archive_page(&row.id).await?;
        }

        for meeting in &self.config.meetings {
            self.api
                .create_page(database_id, meeting_properties(meeting))
                .await?;
        }

        if let Some(block_id) = &self.config.summary_block_id {
            self.api.update_block(block_id, &blocks::code(&summary)).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::testing::{Call, RecordingApi};

    fn meeting(title: &str, start: &str, end: &str) -> MeetingRecord {
        MeetingRecord {
            title: title.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_meeting_properties() {
        let props = meeting_properties(&meeting(
            "Meeting 1",
            "2025-02-23T10:20:00+03:00",
            "2025-02-23T11:20:00+03:00",
        ));
        assert_eq!(
            props,
            json!({
                "Name": {"title": [{"text": {"content": "Meeting 1"}}]},
                "Date": {"date": {"start": "2025-02-23T10:20:00+03:00", "end": "2025-02-23T11:20:00+03:00"}}
            })
        );
    }

    #[tokio::test]
    async fn test_archives_before_creating() {
        let api = Arc::new(RecordingApi::new().with_rows(
            "meetings-db",
            vec![("old-1", json!({})), ("old-2", json!({}))],
        ));
        let meetings = vec![
            meeting("Meeting 1", "2025-02-23T10:20:00+03:00", "2025-02-23T11:20:00+03:00"),
            meeting("Meeting 2", "2025-02-23T18:20:00+03:00", "2025-02-23T20:00:00+03:00"),
        ];
        let task = MeetingTask::new(
            api.clone(),
            MeetingConfig {
                database_id: "meetings-db".to_string(),
                summary_block_id: None,
                meetings: meetings.clone(),
            },
        );

        task.run().await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::Query {
                    database_id: "meetings-db".to_string(),
                    filter: None,
                },
                Call::Archive("old-1".to_string()),
                Call::Archive("old-2".to_string()),
                Call::CreatePage {
                    database_id: "meetings-db".to_string(),
                    properties: meeting_properties(&meetings[0]),
                },
                Call::CreatePage {
                    database_id: "meetings-db".to_string(),
                    properties: meeting_properties(&meetings[1]),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_writes_summary_block() {
        let api = Arc::new(RecordingApi::new());
        let task = MeetingTask::new(
            api.clone(),
            MeetingConfig {
                database_id: "meetings-db".to_string(),
                summary_block_id: Some("meetings-block".to_string()),
                meetings: vec![],
            },
        );

        task.run().await.unwrap();

        assert_eq!(
            api.calls().last(),
            Some(&Call::UpdateBlock {
                block_id: "meetings-block".to_string(),
                content: blocks::code(crate::core::format::NO_MEETINGS),
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_timestamp_archives_nothing() {
        let api = Arc::new(RecordingApi::new().with_rows("meetings-db", vec![("old-1", json!({}))]));
        let task = MeetingTask::new(
            api.clone(),
            MeetingConfig {
                database_id: "meetings-db".to_string(),
                summary_block_id: Some("meetings-block".to_string()),
                meetings: vec![meeting("Broken", "2025-02-31T10:00:00", "2025-02-23T11:00:00")],
            },
        );

        let err = task.run().await.unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { .. }));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_timestamp_without_summary_block_archives_nothing() {
        let api = Arc::new(RecordingApi::new().with_rows("meetings-db", vec![("old-1", json!({}))]));
        let task = MeetingTask::new(
            api.clone(),
            MeetingConfig {
                database_id: "meetings-db".to_string(),
                summary_block_id: None,
                meetings: vec![meeting("Broken", "2025-02-23T10:00:00", "2025-02-29T11:00:00")],
            },
        );

        let err = task.run().await.unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { .. }));
        assert!(api.calls().is_empty());
    }
}
