pub mod model;

pub use model::{MonitorPreference, ParseMonitorPreferenceError, UserPreferences};
