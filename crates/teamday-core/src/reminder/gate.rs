//! One-time permission and channel lifecycle.

use std::sync::{Arc, RwLock};

use tokio::sync::{Mutex as AsyncMutex, OnceCell};
use tracing::warn;

use super::backend::{ChannelSpec, NotificationBackend};
use crate::error::ReminderError;

/// OS notification authorization, process-wide.
///
/// `Unknown` at cold start; a request resolves it to a terminal state.
/// Anything short of `Granted` reads as "do not schedule".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Unknown,
    Granted,
    Denied,
}

impl PermissionState {
    /// Terminal states are cached; `Unknown` may be queried again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, PermissionState::Unknown)
    }

    pub fn is_granted(self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

impl Default for PermissionState {
    fn default() -> Self {
        PermissionState::Unknown
    }
}

/// Manages the one-time permission prompt and the single notification
/// channel.
///
/// No failure here is ever fatal: an unanswerable permission query reads as
/// `Denied` and scheduling simply skips.
pub struct PermissionGate {
    backend: Arc<dyn NotificationBackend>,
    state: RwLock<PermissionState>,
    prompt_lock: AsyncMutex<()>,
    channel: OnceCell<String>,
    channel_spec: ChannelSpec,
}

impl PermissionGate {
    pub fn new(backend: Arc<dyn NotificationBackend>) -> Self {
        Self::with_channel(backend, ChannelSpec::default())
    }

    pub fn with_channel(backend: Arc<dyn NotificationBackend>, spec: ChannelSpec) -> Self {
        Self {
            backend,
            state: RwLock::new(PermissionState::Unknown),
            prompt_lock: AsyncMutex::new(()),
            channel: OnceCell::new(),
            channel_spec: spec,
        }
    }

    /// Snapshot without blocking. Stays `Unknown` until a request resolves,
    /// and a request in flight still reads as its pre-request value.
    pub fn current(&self) -> PermissionState {
        *self.state.read().unwrap()
    }

    /// Ask the user for notification authorization.
    ///
    /// Prompts at most once: a terminal result is cached and returned on
    /// every later call. A backend failure reads as `Denied` but is not
    /// cached, so an explicit retry may still prompt.
    pub async fn request_permission(&self) -> PermissionState {
        let _prompting = self.prompt_lock.lock().await;
        let cached = self.current();
        if cached.is_terminal() {
            return cached;
        }
        match self.backend.request_permission().await {
            Ok(state) => {
                if state.is_terminal() {
                    *self.state.write().unwrap() = state;
                }
                state
            }
            Err(err) => {
                warn!("permission query failed, treating as denied: {err}");
                PermissionState::Denied
            }
        }
    }

    /// Create the default channel on first call; later calls return the
    /// cached id without touching the backend again.
    pub async fn ensure_channel(&self) -> Result<&str, ReminderError> {
        self.channel
            .get_or_try_init(|| self.backend.ensure_channel(&self.channel_spec))
            .await
            .map(String::as_str)
    }
}
