//! Integration tests for the calendar aggregation pipeline: feed ingestion,
//! mark building, selection overlay, and the day filter staying in lockstep.

use chrono::{DateTime, Days, Local, TimeZone, Utc};
use proptest::prelude::*;

use teamday_core::{
    build_marks, filter_by_day, overlay_selection, DayKey, DomainEvent, DotColor, Feed,
    Meeting, MeetingSpan, Task, TaskStatus,
};

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn day(s: &str) -> DayKey {
    s.parse().unwrap()
}

#[test]
fn completed_task_marks_its_deadline_day_green() {
    let events = vec![DomainEvent::Task(Task {
        id: "1".into(),
        title: "quarterly report".into(),
        deadline: local(2024, 5, 1, 10, 0),
        status: TaskStatus::Completed,
    })];

    let marks = build_marks(&events, MeetingSpan::Boundaries);
    let mark = &marks[&day("2024-05-01")];
    assert!(mark.has_marker);
    assert_eq!(mark.dot_color, Some(DotColor::Green));
}

#[test]
fn multi_day_meeting_marks_only_its_boundary_days() {
    let events = vec![DomainEvent::Meeting(
        Meeting::new(
            "2",
            "offsite",
            local(2024, 5, 1, 9, 0),
            local(2024, 5, 3, 11, 0),
        )
        .unwrap(),
    )];

    let marks = build_marks(&events, MeetingSpan::Boundaries);
    assert!(marks.contains_key(&day("2024-05-01")));
    assert!(marks.contains_key(&day("2024-05-03")));
    assert!(!marks.contains_key(&day("2024-05-02")));
}

#[test]
fn selection_composes_over_existing_marks() {
    let events = vec![DomainEvent::Task(Task {
        id: "1".into(),
        title: "quarterly report".into(),
        deadline: local(2024, 5, 1, 10, 0),
        status: TaskStatus::Completed,
    })];
    let marks = build_marks(&events, MeetingSpan::Boundaries);

    let selected = overlay_selection(&marks, day("2024-05-01"));
    let mark = &selected[&day("2024-05-01")];
    assert_eq!(mark.dot_color, Some(DotColor::Green));
    assert!(mark.selected);

    let empty_selected = overlay_selection(&marks, day("2024-05-02"));
    let mark = &empty_selected[&day("2024-05-02")];
    assert!(mark.selected);
    assert!(!mark.has_marker);
}

#[test]
fn feed_to_marks_to_filter_pipeline() {
    // one malformed task rides along and must vanish without a trace
    let json = format!(
        r#"{{
            "tasks": [
                {{"id": 1, "name": "report", "deadLine": "{}", "status": "pending"}},
                {{"id": 2, "name": "broken"}}
            ],
            "meetings": [
                {{"id": 3, "name": "standup", "startDate": "{}", "endDate": "{}"}}
            ]
        }}"#,
        local(2024, 5, 1, 10, 0).to_rfc3339(),
        local(2024, 5, 1, 9, 0).to_rfc3339(),
        local(2024, 5, 1, 9, 30).to_rfc3339(),
    );
    let feed: Feed = serde_json::from_str(&json).unwrap();
    let events = feed.into_events();
    assert_eq!(events.len(), 2);

    let marks = build_marks(&events, MeetingSpan::Boundaries);
    assert_eq!(marks.len(), 1);
    let mark = &marks[&day("2024-05-01")];
    // standup arrives after the task, so the meeting color wins
    assert_eq!(mark.dot_color, Some(DotColor::Azure));
    assert_eq!(mark.contributing.len(), 2);

    let listed = filter_by_day(&events, day("2024-05-01"), MeetingSpan::Boundaries);
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id(), "1");
    assert_eq!(listed[1].id(), "3");
}

proptest! {
    /// For any day, the filter finds events exactly when the aggregator put
    /// a marker there -- under either span policy.
    #[test]
    fn marks_and_filter_agree(
        specs in proptest::collection::vec(
            (any::<bool>(), 0i64..(30 * 86_400), 3_600i64..(72 * 3_600)),
            0..20,
        ),
        span_every in any::<bool>(),
    ) {
        let base = 1_714_000_000i64;
        let events: Vec<DomainEvent> = specs
            .iter()
            .enumerate()
            .map(|(i, (is_task, offset, len))| {
                let start = Utc.timestamp_opt(base + offset, 0).unwrap();
                if *is_task {
                    DomainEvent::Task(Task {
                        id: i.to_string(),
                        title: format!("task {i}"),
                        deadline: start,
                        status: TaskStatus::Pending,
                    })
                } else {
                    DomainEvent::Meeting(
                        Meeting::new(
                            i.to_string(),
                            format!("meeting {i}"),
                            start,
                            start + chrono::Duration::seconds(*len),
                        )
                        .unwrap(),
                    )
                }
            })
            .collect();
        let span = if span_every { MeetingSpan::EveryDay } else { MeetingSpan::Boundaries };

        let marks = build_marks(&events, span);
        for marked_day in marks.keys() {
            prop_assert!(!filter_by_day(&events, *marked_day, span).is_empty());
        }

        // sweep the whole window the events could touch, plus margin
        let first = DayKey::of(Utc.timestamp_opt(base, 0).unwrap())
            .date()
            .checked_sub_days(Days::new(2))
            .unwrap();
        for offset in 0..40 {
            let swept = DayKey::from(first.checked_add_days(Days::new(offset)).unwrap());
            if !marks.contains_key(&swept) {
                prop_assert!(filter_by_day(&events, swept, span).is_empty());
            }
        }
    }
}
