//! Per-day calendar markers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::event::{DomainEvent, EventKey, TaskStatus};

/// Dot colors rendered on the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotColor {
    Green,
    Blue,
    Amber,
    Gray,
    Azure,
}

impl DotColor {
    /// Hex value the display layer paints with.
    pub fn hex(self) -> &'static str {
        match self {
            DotColor::Green => "#4CAF50",
            DotColor::Blue => "#2196F3",
            DotColor::Amber => "#FFC107",
            DotColor::Gray => "#757575",
            DotColor::Azure => "#007AFF",
        }
    }
}

/// Meeting dot and day-selection highlight.
const AZURE: DotColor = DotColor::Azure;

fn status_color(status: TaskStatus) -> DotColor {
    match status {
        TaskStatus::Completed => DotColor::Green,
        TaskStatus::InProgress => DotColor::Blue,
        TaskStatus::Pending => DotColor::Amber,
        TaskStatus::Unknown => DotColor::Gray,
    }
}

fn event_color(event: &DomainEvent) -> DotColor {
    match event {
        DomainEvent::Task(task) => status_color(task.status),
        DomainEvent::Meeting(_) => AZURE,
    }
}

/// How a multi-day meeting marks the grid.
///
/// `Boundaries` marks only the start and end days, leaving the interior
/// unmarked; `EveryDay` marks the whole span. The filter consumes the same
/// value, so either choice keeps the dots and the day list in agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingSpan {
    Boundaries,
    EveryDay,
}

impl Default for MeetingSpan {
    fn default() -> Self {
        MeetingSpan::Boundaries
    }
}

/// Per-day display metadata. Built fresh on every [`build_marks`] call; the
/// selection fields are only ever set by [`overlay_selection`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMark {
    pub has_marker: bool,
    /// Dot color for the day; the last contributing event in input order
    /// wins when several events share it.
    pub dot_color: Option<DotColor>,
    /// Every event that put a mark on this day.
    pub contributing: BTreeSet<EventKey>,
    pub selected: bool,
    pub selected_color: Option<DotColor>,
}

impl CalendarMark {
    fn unmarked() -> Self {
        Self {
            has_marker: false,
            dot_color: None,
            contributing: BTreeSet::new(),
            selected: false,
            selected_color: None,
        }
    }
}

/// Folds an event collection into a day-to-mark mapping.
///
/// Tasks mark their deadline day with a status-derived color; meetings mark
/// the days chosen by `span` with the fixed meeting color. Input order is
/// significant: when events share a day, the last one decides `dot_color`
/// while `contributing` accumulates all of them.
pub fn build_marks(
    events: &[DomainEvent],
    span: MeetingSpan,
) -> BTreeMap<DayKey, CalendarMark> {
    let mut marks = BTreeMap::new();
    for event in events {
        let color = event_color(event);
        for day in super::days_of(event, span) {
            let mark = marks.entry(day).or_insert_with(CalendarMark::unmarked);
            mark.has_marker = true;
            mark.dot_color = Some(color);
            mark.contributing.insert(event.key());
        }
    }
    marks
}

/// Returns a copy of `marks` with `day` highlighted.
///
/// Existing marker fields are preserved; a day with no marker gains a
/// selection-only entry (`has_marker == false`).
pub fn overlay_selection(
    marks: &BTreeMap<DayKey, CalendarMark>,
    day: DayKey,
) -> BTreeMap<DayKey, CalendarMark> {
    let mut out = marks.clone();
    let mark = out.entry(day).or_insert_with(CalendarMark::unmarked);
    mark.selected = true;
    mark.selected_color = Some(AZURE);
    out
}
