//! End-to-end reminder lifecycle over the public API: create, edit, delete,
//! logout -- the calls the surrounding CRUD screens make.

use std::sync::Arc;

use chrono::{Duration, Utc};

use teamday_core::{
    DomainEvent, EventKey, EventKind, Meeting, MemoryBackend, NotificationBackend,
    PermissionGate, ReminderConfig, ReminderScheduler, ScheduleOutcome, Task, TaskStatus,
};

#[tokio::test]
async fn crud_screen_lifecycle() {
    let backend = Arc::new(MemoryBackend::new());
    let dyn_backend: Arc<dyn NotificationBackend> = backend.clone();
    let gate = Arc::new(PermissionGate::new(dyn_backend.clone()));
    gate.request_permission().await;
    let scheduler = ReminderScheduler::new(dyn_backend, gate, ReminderConfig::default());

    // create: one task, one meeting
    let deadline = Utc::now() + Duration::hours(6);
    let task = DomainEvent::Task(Task {
        id: "10".into(),
        title: "prepare slides".into(),
        deadline,
        status: TaskStatus::InProgress,
    });
    let meeting_start = Utc::now() + Duration::hours(8);
    let meeting = DomainEvent::Meeting(
        Meeting::new(
            "20",
            "kickoff",
            meeting_start,
            meeting_start + Duration::hours(1),
        )
        .unwrap(),
    );

    let results = scheduler.schedule_batch(&[task, meeting]).await;
    assert!(results
        .iter()
        .all(|(_, r)| matches!(r, Ok(ScheduleOutcome::Scheduled { .. }))));
    assert_eq!(backend.pending().len(), 2);

    // edit: the task's deadline moves; exactly one trigger remains for it
    let edited = DomainEvent::Task(Task {
        id: "10".into(),
        title: "prepare slides".into(),
        deadline: deadline + Duration::hours(2),
        status: TaskStatus::InProgress,
    });
    scheduler.schedule_reminder(&edited).await.unwrap();
    let task_key = EventKey::new(EventKind::Task, "10");
    assert_eq!(backend.pending_for(&task_key).len(), 1);
    assert_eq!(
        backend.pending_for(&task_key)[0].fire_at,
        deadline + Duration::hours(2) - Duration::minutes(10)
    );
    assert_eq!(backend.pending().len(), 2);

    // delete: the meeting goes away with its trigger
    let meeting_key = EventKey::new(EventKind::Meeting, "20");
    scheduler.cancel_reminder(&meeting_key).await.unwrap();
    assert!(backend.pending_for(&meeting_key).is_empty());
    assert_eq!(backend.pending().len(), 1);

    // logout: nothing survives
    scheduler.cancel_all().await.unwrap();
    assert!(backend.pending().is_empty());
}
