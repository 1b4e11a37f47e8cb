//! # TeamDay Core Library
//!
//! This library provides the scheduling and calendar logic for the TeamDay
//! coordination client. The screens around it do CRUD forms and HTTP; this
//! crate owns the temporal logic: reminder lead times, idempotent trigger
//! management, and per-day aggregation of heterogeneous event collections.
//!
//! ## Architecture
//!
//! - **Reminders**: asynchronous calls against the OS notification store,
//!   which solely owns pending triggers; idempotence comes from
//!   deterministic keys plus cancel-before-create
//! - **Calendar**: pure synchronous folds from event collections into the
//!   day-to-mark mapping a calendar grid renders from, with a matching day
//!   filter for the event list
//! - **Feed**: serde ingestion of the backend's wire shapes with per-record
//!   error isolation
//!
//! ## Key Components
//!
//! - [`ReminderScheduler`]: lead-time scheduling with replace semantics
//! - [`PermissionGate`]: one-time permission prompt and the single channel
//! - [`build_marks`] / [`overlay_selection`] / [`filter_by_day`]: calendar
//!   aggregation and day filtering over the same [`DayKey`] derivation
//! - [`Config`]: TOML configuration management

pub mod calendar;
pub mod day;
pub mod error;
pub mod event;
pub mod feed;
pub mod reminder;
pub mod storage;

pub use calendar::{
    build_marks, filter_by_day, overlay_selection, CalendarMark, DotColor, MeetingSpan,
};
pub use day::DayKey;
pub use error::{ConfigError, CoreError, ReminderError, Result, ValidationError};
pub use event::{DomainEvent, EventKey, EventKind, Meeting, Task, TaskStatus};
pub use feed::{collect_events, Collection, Feed, MeetingRecord, TaskRecord};
pub use reminder::{
    ChannelSpec, DesktopBackend, Importance, MemoryBackend, NotificationBackend,
    PermissionGate, PermissionState, ReminderScheduler, ReminderTrigger, ScheduleOutcome,
    SkipReason,
};
pub use storage::{CalendarConfig, Config, ReminderConfig};
