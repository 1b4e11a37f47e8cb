use clap::Subcommand;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use teamday_core::{
    Config, DesktopBackend, NotificationBackend, PermissionGate, ReminderScheduler,
    ScheduleOutcome, SkipReason,
};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Schedule reminders for a feed and wait for them to fire
    Run {
        /// JSON feed file with `tasks` and `meetings` collections
        #[arg(long)]
        events: PathBuf,
        /// Override the configured lead time (minutes)
        #[arg(long)]
        lead: Option<u64>,
    },
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn Error>> {
    match action {
        RemindAction::Run { events, lead } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_reminders(&events, lead))
        }
    }
}

async fn run_reminders(path: &Path, lead: Option<u64>) -> Result<(), Box<dyn Error>> {
    let events = super::load_feed(path)?;
    let mut config = Config::load_or_default().reminders;
    if let Some(minutes) = lead {
        config.lead_time_minutes = minutes;
    }
    if !config.enabled {
        println!("reminders are disabled in config");
        return Ok(());
    }

    let desktop = Arc::new(DesktopBackend::new(config.app_name.clone()));
    let backend: Arc<dyn NotificationBackend> = desktop.clone();
    let gate = Arc::new(PermissionGate::new(backend.clone()));
    gate.request_permission().await;
    let scheduler = ReminderScheduler::new(backend, gate, config);

    let results = scheduler.schedule_batch(&events).await;
    for (key, result) in &results {
        match result {
            Ok(ScheduleOutcome::Scheduled { fire_at }) => {
                println!(
                    "{key}  fires {}",
                    fire_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                );
            }
            Ok(ScheduleOutcome::Skipped(SkipReason::PastDeadline)) => {
                println!("{key}  skipped (past deadline)");
            }
            Ok(ScheduleOutcome::Skipped(SkipReason::PermissionDenied)) => {
                println!("{key}  skipped (permission denied)");
            }
            Err(err) => {
                println!("{key}  failed: {err}");
            }
        }
    }

    let scheduled = results
        .iter()
        .filter(|(_, r)| matches!(r, Ok(ScheduleOutcome::Scheduled { .. })))
        .count();
    if scheduled == 0 {
        println!("nothing to wait for");
        return Ok(());
    }

    println!("waiting for {scheduled} reminder(s)...");
    while desktop.pending_count() > 0 {
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    Ok(())
}
