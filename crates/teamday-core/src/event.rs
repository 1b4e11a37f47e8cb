//! Domain events: tasks with a deadline, meetings with a start/end interval.
//!
//! An edit produces a new event with the same `(kind, id)` but possibly a
//! different time; ids are stable across edits and unique within their kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Kind of domain event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Task,
    Meeting,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Task => "task",
            EventKind::Meeting => "meeting",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task progress state; drives the calendar dot color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Unknown,
}

impl TaskStatus {
    /// Lenient parse used at the feed boundary; anything unrecognized lands
    /// on `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => TaskStatus::Pending,
            "in_progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            _ => TaskStatus::Unknown,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Unknown
    }
}

/// Identifies one logical event across edits.
///
/// Ids are unique within their kind, so `(kind, id)` is the
/// at-most-one-reminder key and the contributing-event identifier in
/// calendar marks.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EventKey {
    pub kind: EventKind,
    pub id: String,
}

impl EventKey {
    pub fn new(kind: EventKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// The rendered form (`task-7`, `meeting-3`) doubles as the identifier
/// handed to the OS notification store.
impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

/// A task with a single due instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub status: TaskStatus,
}

/// A meeting occupying the interval `[start_at, end_at)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl Meeting {
    /// Builds a meeting, enforcing `start_at < end_at`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if end_at <= start_at {
            return Err(ValidationError::InvalidTimeRange {
                start: start_at,
                end: end_at,
            });
        }
        Ok(Self {
            id: id.into(),
            title: title.into(),
            start_at,
            end_at,
        })
    }
}

/// The unit the scheduling and calendar engine operates on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomainEvent {
    Task(Task),
    Meeting(Meeting),
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::Task(_) => EventKind::Task,
            DomainEvent::Meeting(_) => EventKind::Meeting,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            DomainEvent::Task(task) => &task.id,
            DomainEvent::Meeting(meeting) => &meeting.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            DomainEvent::Task(task) => &task.title,
            DomainEvent::Meeting(meeting) => &meeting.title,
        }
    }

    pub fn key(&self) -> EventKey {
        EventKey::new(self.kind(), self.id())
    }

    /// Instant the reminder lead time counts back from: the deadline for a
    /// task, the start for a meeting.
    pub fn starts_at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::Task(task) => task.deadline,
            DomainEvent::Meeting(meeting) => meeting.start_at,
        }
    }
}
