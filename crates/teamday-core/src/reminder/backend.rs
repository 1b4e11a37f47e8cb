//! Port to the platform notification store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::gate::PermissionState;
use crate::error::ReminderError;
use crate::event::EventKey;

/// Importance of the notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Low,
    Default,
    High,
}

/// The single channel the app posts reminders through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub id: String,
    pub name: String,
    pub importance: Importance,
}

impl Default for ChannelSpec {
    fn default() -> Self {
        Self {
            id: "default".into(),
            name: "Default Channel".into(),
            importance: Importance::High,
        }
    }
}

/// A scheduled local notification. Owned by the OS store once created; the
/// engine hands it over and forgets it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderTrigger {
    pub key: EventKey,
    pub fire_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
    pub channel_id: String,
}

/// The five operations the engine performs against the platform.
///
/// `cancel_trigger` for a key with no pending trigger must succeed as a
/// no-op.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Ask the user for notification authorization.
    async fn request_permission(&self) -> Result<PermissionState, ReminderError>;

    /// Create the channel if it does not exist yet; returns its id.
    async fn ensure_channel(&self, spec: &ChannelSpec) -> Result<String, ReminderError>;

    async fn create_trigger(&self, trigger: ReminderTrigger) -> Result<(), ReminderError>;

    async fn cancel_trigger(&self, key: &EventKey) -> Result<(), ReminderError>;

    async fn cancel_all(&self) -> Result<(), ReminderError>;
}

/// In-process backend for tests and embedders without a platform store.
///
/// Pending triggers use list semantics: nothing here dedupes by key, so a
/// scheduler that forgets to cancel before re-creating shows up as a
/// duplicate trigger rather than being silently papered over.
pub struct MemoryBackend {
    permission: Mutex<PermissionState>,
    prompts: AtomicUsize,
    channels: Mutex<Vec<String>>,
    pending: Mutex<Vec<ReminderTrigger>>,
    fail_keys: Mutex<HashSet<EventKey>>,
}

impl MemoryBackend {
    /// A backend whose permission prompt resolves `Granted`.
    pub fn new() -> Self {
        Self {
            permission: Mutex::new(PermissionState::Granted),
            prompts: AtomicUsize::new(0),
            channels: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            fail_keys: Mutex::new(HashSet::new()),
        }
    }

    /// Make the permission prompt resolve `Denied` from now on.
    pub fn deny_permission(&self) {
        *self.permission.lock().unwrap() = PermissionState::Denied;
    }

    /// Make `create_trigger` fail for `key` from now on.
    pub fn fail_creates_for(&self, key: EventKey) {
        self.fail_keys.lock().unwrap().insert(key);
    }

    pub fn pending(&self) -> Vec<ReminderTrigger> {
        self.pending.lock().unwrap().clone()
    }

    pub fn pending_for(&self, key: &EventKey) -> Vec<ReminderTrigger> {
        self.pending
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.key == key)
            .cloned()
            .collect()
    }

    /// How many times the user was prompted.
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    /// How many channels exist.
    pub fn channel_count(&self) -> usize {
        self.channels.lock().unwrap().len()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationBackend for MemoryBackend {
    async fn request_permission(&self) -> Result<PermissionState, ReminderError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        Ok(*self.permission.lock().unwrap())
    }

    async fn ensure_channel(&self, spec: &ChannelSpec) -> Result<String, ReminderError> {
        let mut channels = self.channels.lock().unwrap();
        if !channels.contains(&spec.id) {
            channels.push(spec.id.clone());
        }
        Ok(spec.id.clone())
    }

    async fn create_trigger(&self, trigger: ReminderTrigger) -> Result<(), ReminderError> {
        if self.fail_keys.lock().unwrap().contains(&trigger.key) {
            return Err(ReminderError::Backend {
                operation: "create_trigger",
                message: format!("injected failure for {}", trigger.key),
            });
        }
        self.pending.lock().unwrap().push(trigger);
        Ok(())
    }

    async fn cancel_trigger(&self, key: &EventKey) -> Result<(), ReminderError> {
        self.pending.lock().unwrap().retain(|t| &t.key != key);
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), ReminderError> {
        self.pending.lock().unwrap().clear();
        Ok(())
    }
}
