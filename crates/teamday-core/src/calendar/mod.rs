//! Calendar day aggregation: per-day markers for the grid and the matching
//! day filter for the event list.
//!
//! Both halves are pure and synchronous; the display layer renders dots and
//! selection straight from the mark mapping without recomputing membership.

mod filter;
mod marks;

pub use filter::filter_by_day;
pub use marks::{build_marks, overlay_selection, CalendarMark, DotColor, MeetingSpan};

use crate::day::DayKey;
use crate::event::DomainEvent;

/// The day set an event contributes to. Shared by [`build_marks`] and
/// [`filter_by_day`] so a day's dot and its event list always agree.
pub(crate) fn days_of(event: &DomainEvent, span: MeetingSpan) -> Vec<DayKey> {
    match event {
        DomainEvent::Task(task) => vec![DayKey::of(task.deadline)],
        DomainEvent::Meeting(meeting) => {
            let start = DayKey::of(meeting.start_at);
            let end = DayKey::of(meeting.end_at);
            match span {
                MeetingSpan::Boundaries if start == end => vec![start],
                MeetingSpan::Boundaries => vec![start, end],
                MeetingSpan::EveryDay => start
                    .date()
                    .iter_days()
                    .take_while(|d| *d <= end.date())
                    .map(DayKey::from)
                    .collect(),
            }
        }
    }
}
