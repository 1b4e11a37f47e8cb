//! Reminder scheduling against the OS notification subsystem.
//!
//! The OS store is the single owner of pending triggers; the engine keeps no
//! copy of it. At-most-one-trigger-per-event comes from deterministic key
//! derivation plus cancel-before-create, not from in-memory bookkeeping.

mod backend;
mod desktop;
mod gate;
mod scheduler;


pub use backend::{
    ChannelSpec, Importance, MemoryBackend, NotificationBackend, ReminderTrigger,
};
pub use desktop::DesktopBackend;
pub use gate::{PermissionGate, PermissionState};
pub use scheduler::{ReminderScheduler, ScheduleOutcome, SkipReason};
