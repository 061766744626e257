//! User-facing status text.

use pp_core::MonitorPreference;

pub const LOADING: &str = "Loading presentations...";
pub const NO_PRESENTATIONS: &str = "No PowerPoint files found.";
pub const SELECT_FOLDER: &str = "Select a folder";
pub const FOLDER_GONE: &str = "The folder no longer exists";
pub const INITIAL_FOLDER_MISSING: &str = "The provided folder does not exist.";
pub const MULTIPLE_MONITORS: &str = "Multiple monitors detected";
pub const SINGLE_MONITOR: &str = "Using the current monitor";

pub fn found(count: usize) -> String {
    match count {
        1 => "Found 1 presentation.".to_string(),
        n => format!("Found {n} presentations."),
    }
}

pub fn unable_to_read_folder(message: &str) -> String {
    format!("Unable to read folder: {message}")
}

pub fn open_failed(message: &str) -> String {
    format!("Error while opening: {message}")
}

pub fn no_presentation_at(position: usize) -> String {
    format!("No presentation at position {position}")
}

pub fn monitor_mode(preference: MonitorPreference) -> String {
    let mode = match preference {
        MonitorPreference::Automatic => "automatic",
        MonitorPreference::Primary => "primary",
        MonitorPreference::Secondary => "extended",
    };
    format!("Monitor mode: {mode}")
}

pub fn monitors(has_multiple: bool) -> &'static str {
    if has_multiple {
        MULTIPLE_MONITORS
    } else {
        SINGLE_MONITOR
    }
}
