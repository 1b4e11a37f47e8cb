//! Reminder scheduling with replace semantics.
//!
//! Per [`EventKey`], operations observe program order: a cancel issued for an
//! older call can never land after a newer create for the same key. Across
//! distinct keys no ordering is guaranteed or needed.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::backend::{NotificationBackend, ReminderTrigger};
use super::gate::PermissionGate;
use crate::error::ReminderError;
use crate::event::{DomainEvent, EventKey, EventKind};
use crate::storage::ReminderConfig;

/// Result of a schedule attempt that completed without a backend error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Trigger created; fires at the contained instant.
    Scheduled { fire_at: DateTime<Utc> },
    /// Nothing scheduled, by policy rather than failure.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The reminder could no longer precede its event.
    PastDeadline,
    /// Notification permission is absent or undecided.
    PermissionDenied,
}

/// Schedules, replaces and cancels reminder triggers.
///
/// The caller's create/edit flow must succeed whether or not its reminder
/// could be scheduled: skips are ordinary outcomes and backend errors are
/// meant to be logged and retried at the next refresh.
pub struct ReminderScheduler {
    backend: Arc<dyn NotificationBackend>,
    gate: Arc<PermissionGate>,
    lead_time: chrono::Duration,
    op_timeout: Duration,
    locks: KeyLocks,
}

impl ReminderScheduler {
    pub fn new(
        backend: Arc<dyn NotificationBackend>,
        gate: Arc<PermissionGate>,
        config: ReminderConfig,
    ) -> Self {
        Self {
            backend,
            gate,
            lead_time: config.lead_time(),
            op_timeout: config.op_timeout(),
            locks: KeyLocks::new(),
        }
    }

    /// Schedule the reminder for one event, replacing any pending trigger
    /// for the same key.
    pub async fn schedule_reminder(
        &self,
        event: &DomainEvent,
    ) -> Result<ScheduleOutcome, ReminderError> {
        let fire_at = event.starts_at() - self.lead_time;
        if fire_at <= Utc::now() {
            debug!(key = %event.key(), "reminder window already passed");
            return Ok(ScheduleOutcome::Skipped(SkipReason::PastDeadline));
        }
        if !self.gate.current().is_granted() {
            debug!(key = %event.key(), "notification permission not granted");
            return Ok(ScheduleOutcome::Skipped(SkipReason::PermissionDenied));
        }

        let channel_id = self
            .bounded("ensure_channel", self.gate.ensure_channel())
            .await?
            .to_string();

        let key = event.key();
        let _guard = self.locks.acquire(&key).await;
        // Replace semantics: an edit that moves a deadline must neither leave
        // the old trigger firing nor produce two.
        self.bounded("cancel_trigger", self.backend.cancel_trigger(&key))
            .await?;
        let trigger = ReminderTrigger {
            key: key.clone(),
            fire_at,
            title: title_for(event.kind()),
            body: self.body_for(event),
            channel_id,
        };
        self.bounded("create_trigger", self.backend.create_trigger(trigger))
            .await?;
        info!(key = %key, fire_at = %fire_at, "reminder scheduled");
        Ok(ScheduleOutcome::Scheduled { fire_at })
    }

    /// Remove any pending trigger for `key`; succeeds when none exists.
    /// Invoked whenever the owning event is deleted.
    pub async fn cancel_reminder(&self, key: &EventKey) -> Result<(), ReminderError> {
        let _guard = self.locks.acquire(key).await;
        self.bounded("cancel_trigger", self.backend.cancel_trigger(key))
            .await?;
        debug!(key = %key, "reminder cancelled");
        Ok(())
    }

    /// Remove every pending trigger system-wide (logout/reset).
    pub async fn cancel_all(&self) -> Result<(), ReminderError> {
        self.bounded("cancel_all", self.backend.cancel_all()).await?;
        info!("all reminders cancelled");
        Ok(())
    }

    /// Schedule reminders for a whole refreshed collection.
    ///
    /// Failures are logged per event and never stop the rest of the batch;
    /// the per-key results let a caller inspect what happened.
    pub async fn schedule_batch(
        &self,
        events: &[DomainEvent],
    ) -> Vec<(EventKey, Result<ScheduleOutcome, ReminderError>)> {
        let mut results = Vec::with_capacity(events.len());
        for event in events {
            let result = self.schedule_reminder(event).await;
            if let Err(err) = &result {
                warn!(key = %event.key(), "scheduling failed, retrying at next refresh: {err}");
            }
            results.push((event.key(), result));
        }
        results
    }

    fn body_for(&self, event: &DomainEvent) -> String {
        let title = event.title();
        if title.is_empty() {
            return String::new();
        }
        format!("\"{title}\" starts in {} minutes", self.lead_time.num_minutes())
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, ReminderError>>,
    ) -> Result<T, ReminderError> {
        match timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ReminderError::Timeout {
                operation,
                timeout_secs: self.op_timeout.as_secs(),
            }),
        }
    }
}

fn title_for(kind: EventKind) -> String {
    match kind {
        EventKind::Task => "Reminder: task",
        EventKind::Meeting => "Reminder: meeting",
    }
    .to_string()
}

/// One async mutex per reminder key; schedule/cancel for the same key run in
/// program order while distinct keys interleave freely.
struct KeyLocks {
    inner: StdMutex<HashMap<EventKey, Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
    fn new() -> Self {
        Self {
            inner: StdMutex::new(HashMap::new()),
        }
    }

    async fn acquire(&self, key: &EventKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap();
            map.entry(key.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
