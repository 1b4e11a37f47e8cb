use clap::Subcommand;
use std::error::Error;
use std::path::PathBuf;

use teamday_core::{
    build_marks, filter_by_day, overlay_selection, Config, DayKey, DomainEvent,
    MeetingSpan,
};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Render per-day markers for an event feed
    Marks {
        /// JSON feed file with `tasks` and `meetings` collections
        #[arg(long)]
        events: PathBuf,
        /// Day to highlight (YYYY-MM-DD)
        #[arg(long)]
        select: Option<DayKey>,
        /// Mark every spanned meeting day instead of boundaries only
        #[arg(long)]
        span_every_day: bool,
        /// Emit the mapping as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the events belonging to one day
    Day {
        /// JSON feed file with `tasks` and `meetings` collections
        #[arg(long)]
        events: PathBuf,
        /// Day to list (YYYY-MM-DD)
        day: DayKey,
        /// Mark every spanned meeting day instead of boundaries only
        #[arg(long)]
        span_every_day: bool,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn Error>> {
    match action {
        CalendarAction::Marks {
            events,
            select,
            span_every_day,
            json,
        } => {
            let events = super::load_feed(&events)?;
            let span = span_policy(span_every_day);
            let marks = build_marks(&events, span);
            let marks = match select {
                Some(day) => overlay_selection(&marks, day),
                None => marks,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&marks)?);
            } else {
                for (day, mark) in &marks {
                    let dot = mark.dot_color.map(|c| c.hex()).unwrap_or("-");
                    let selected = if mark.selected { "  selected" } else { "" };
                    println!(
                        "{day}  dot={dot}  events={}{selected}",
                        mark.contributing.len()
                    );
                }
            }
        }
        CalendarAction::Day {
            events,
            day,
            span_every_day,
        } => {
            let events = super::load_feed(&events)?;
            let span = span_policy(span_every_day);
            let found = filter_by_day(&events, day, span);
            if found.is_empty() {
                println!("no events on {day}");
            }
            for event in found {
                print_event(event);
            }
        }
    }
    Ok(())
}

fn span_policy(every_day: bool) -> MeetingSpan {
    if every_day {
        MeetingSpan::EveryDay
    } else {
        Config::load_or_default().calendar.meeting_span
    }
}

fn print_event(event: &DomainEvent) {
    match event {
        DomainEvent::Task(task) => {
            println!(
                "task {}  {}  due {}  [{:?}]",
                task.id, task.title, task.deadline, task.status
            );
        }
        DomainEvent::Meeting(meeting) => {
            println!(
                "meeting {}  {}  {} -> {}",
                meeting.id, meeting.title, meeting.start_at, meeting.end_at
            );
        }
    }
}
