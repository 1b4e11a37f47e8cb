//! Wire-format ingestion for the backend's task and meeting payloads.
//!
//! The REST transport itself lives outside the engine; the surrounding
//! screens hand the fetched collections over after every load, refresh or
//! focus. Records with missing or malformed timestamps are dropped one at a
//! time with a warning, so one bad row never sinks the batch it arrived in.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::error::ValidationError;
use crate::event::{DomainEvent, Meeting, Task, TaskStatus};

/// JSON-LD collection envelope the backend wraps list responses in.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(rename = "member", default)]
    pub member: Vec<T>,
}

/// Task row as served by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dead_line: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Meeting row as served by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl TryFrom<TaskRecord> for DomainEvent {
    type Error = ValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, ValidationError> {
        let deadline = record.dead_line.ok_or(ValidationError::MissingTimestamp {
            kind: "task",
            id: record.id.to_string(),
            field: "deadLine",
        })?;
        let status = record
            .status
            .as_deref()
            .map(TaskStatus::parse)
            .unwrap_or_default();
        Ok(DomainEvent::Task(Task {
            id: record.id.to_string(),
            title: record.name.unwrap_or_default(),
            deadline,
            status,
        }))
    }
}

impl TryFrom<MeetingRecord> for DomainEvent {
    type Error = ValidationError;

    fn try_from(record: MeetingRecord) -> Result<Self, ValidationError> {
        let start_at = record.start_date.ok_or(ValidationError::MissingTimestamp {
            kind: "meeting",
            id: record.id.to_string(),
            field: "startDate",
        })?;
        let end_at = record.end_date.ok_or(ValidationError::MissingTimestamp {
            kind: "meeting",
            id: record.id.to_string(),
            field: "endDate",
        })?;
        let meeting = Meeting::new(
            record.id.to_string(),
            record.name.unwrap_or_default(),
            start_at,
            end_at,
        )?;
        Ok(DomainEvent::Meeting(meeting))
    }
}

/// Converts fetched collections into domain events, skipping invalid
/// records with a logged warning.
pub fn collect_events(
    tasks: Vec<TaskRecord>,
    meetings: Vec<MeetingRecord>,
) -> Vec<DomainEvent> {
    let mut events = Vec::with_capacity(tasks.len() + meetings.len());
    for record in tasks {
        match DomainEvent::try_from(record) {
            Ok(event) => events.push(event),
            Err(err) => warn!("skipping task: {err}"),
        }
    }
    for record in meetings {
        match DomainEvent::try_from(record) {
            Ok(event) => events.push(event),
            Err(err) => warn!("skipping meeting: {err}"),
        }
    }
    events
}

/// On-disk feed shape the CLI consumes: both collections in one document.
#[derive(Debug, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub meetings: Vec<MeetingRecord>,
}

impl Feed {
    /// Read a feed document from disk.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn into_events(self) -> Vec<DomainEvent> {
        collect_events(self.tasks, self.meetings)
    }
}
