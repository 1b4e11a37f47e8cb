pub mod calendar;
pub mod config;
pub mod remind;

use std::error::Error;
use std::path::Path;

use teamday_core::{DomainEvent, Feed};

/// Load a JSON feed file (`tasks` + `meetings` collections) into domain
/// events, dropping malformed records the same way a fetch would.
pub(crate) fn load_feed(path: &Path) -> Result<Vec<DomainEvent>, Box<dyn Error>> {
    Ok(Feed::load(path)?.into_events())
}
