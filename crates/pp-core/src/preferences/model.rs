use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the slideshow should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MonitorPreference {
    /// Decide at launch time from the number of attached displays.
    #[default]
    Automatic,
    /// The current display.
    Primary,
    /// A second, extended display with presenter view.
    Secondary,
}

impl MonitorPreference {
    /// Short label for the surface.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Automatic => "Automatic",
            Self::Primary => "Primary",
            Self::Secondary => "Extended",
        }
    }

    /// Replace `Automatic` with a concrete target.
    ///
    /// Multiple attached displays resolve to `Secondary`, otherwise `Primary`.
    /// Explicit preferences are returned unchanged.
    pub fn resolve(self, has_multiple_displays: bool) -> Self {
        match self {
            Self::Automatic if has_multiple_displays => Self::Secondary,
            Self::Automatic => Self::Primary,
            explicit => explicit,
        }
    }

    pub fn all() -> &'static [MonitorPreference] {
        &[Self::Automatic, Self::Primary, Self::Secondary]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown monitor preference: {0} (expected auto, primary or secondary)")]
pub struct ParseMonitorPreferenceError(pub String);

impl FromStr for MonitorPreference {
    type Err = ParseMonitorPreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "automatic" => Ok(Self::Automatic),
            "primary" => Ok(Self::Primary),
            "secondary" | "extended" => Ok(Self::Secondary),
            other => Err(ParseMonitorPreferenceError(other.to_string())),
        }
    }
}

/// Persisted user-facing configuration.
///
/// Serialized as `{ "backgroundImagePath": string|null, "monitorPreference": ... }`
/// where the preference is one of `"Automatic"`, `"Primary"` or `"Secondary"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub background_image_path: Option<PathBuf>,

    #[serde(default)]
    pub monitor_preference: MonitorPreference,
}
