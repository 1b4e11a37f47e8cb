mod config;

pub use config::{CalendarConfig, Config, ReminderConfig};

use std::path::PathBuf;

/// Returns `~/.config/teamday[-dev]/` based on TEAMDAY_ENV.
///
/// Set TEAMDAY_ENV=dev to use a development config directory.
pub fn config_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TEAMDAY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("teamday-dev")
    } else {
        base_dir.join("teamday")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
