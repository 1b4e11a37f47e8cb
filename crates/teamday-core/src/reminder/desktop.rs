//! Desktop delivery: tokio timers plus native notifications.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use notify_rust::Notification;
use tokio::task::JoinHandle;
use tracing::error;

use super::backend::{ChannelSpec, NotificationBackend, ReminderTrigger};
use super::gate::PermissionState;
use crate::error::ReminderError;
use crate::event::EventKey;

/// Backend for desktop platforms.
///
/// Each trigger becomes a tokio task that sleeps until `fire_at` and shows a
/// native notification; cancelling aborts the task. Desktop systems have no
/// runtime permission prompt, so authorization always resolves `Granted`,
/// and the channel id is simply echoed back.
pub struct DesktopBackend {
    app_name: String,
    pending: Arc<Mutex<HashMap<EventKey, JoinHandle<()>>>>,
}

impl DesktopBackend {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Triggers still waiting to fire. Lets a runner drain before exiting,
    /// since pending triggers die with the process.
    pub fn pending_count(&self) -> usize {
        let mut pending = self.pending.lock().unwrap();
        pending.retain(|_, handle| !handle.is_finished());
        pending.len()
    }
}

#[async_trait]
impl NotificationBackend for DesktopBackend {
    async fn request_permission(&self) -> Result<PermissionState, ReminderError> {
        Ok(PermissionState::Granted)
    }

    async fn ensure_channel(&self, spec: &ChannelSpec) -> Result<String, ReminderError> {
        Ok(spec.id.clone())
    }

    async fn create_trigger(&self, trigger: ReminderTrigger) -> Result<(), ReminderError> {
        let wait = (trigger.fire_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        let key = trigger.key.clone();
        let app_name = self.app_name.clone();
        let pending = Arc::clone(&self.pending);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            if let Err(err) = Notification::new()
                .appname(&app_name)
                .summary(&trigger.title)
                .body(&trigger.body)
                .show()
            {
                error!(key = %trigger.key, "failed to show notification: {err}");
            }
            pending.lock().unwrap().remove(&trigger.key);
        });
        if let Some(old) = self.pending.lock().unwrap().insert(key, handle) {
            old.abort();
        }
        Ok(())
    }

    async fn cancel_trigger(&self, key: &EventKey) -> Result<(), ReminderError> {
        if let Some(handle) = self.pending.lock().unwrap().remove(key) {
            handle.abort();
        }
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), ReminderError> {
        for (_, handle) in self.pending.lock().unwrap().drain() {
            handle.abort();
        }
        Ok(())
    }
}
