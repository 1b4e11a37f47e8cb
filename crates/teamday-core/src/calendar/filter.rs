//! Day filter for the event list.

use crate::day::DayKey;
use crate::event::DomainEvent;

use super::MeetingSpan;

/// Events belonging to `day`, in input order.
///
/// Membership comes from the same day set the aggregator marks with, so for
/// any day `d`, `filter_by_day(events, d, span)` is non-empty exactly when
/// `d` carries a marker in `build_marks(events, span)`.
pub fn filter_by_day<'a>(
    events: &'a [DomainEvent],
    day: DayKey,
    span: MeetingSpan,
) -> Vec<&'a DomainEvent> {
    events
        .iter()
        .filter(|event| super::days_of(event, span).contains(&day))
        .collect()
}
