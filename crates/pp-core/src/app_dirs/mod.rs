use std::path::PathBuf;

const PREFERENCES_FILE_NAME: &str = "user-preferences.json";
const PREVIEWS_DIR_NAME: &str = "Previews";
const LOGS_DIR_NAME: &str = "logs";
const CONFIG_FILE_NAME: &str = "config.toml";
const OFFICE_PROFILES_DIR_NAME: &str = "office-profiles";

/// Per-user application directories. Facts only; nothing here touches the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
    pub app_cache_root: PathBuf,
    pub app_config_root: PathBuf,
}

impl AppDirs {
    pub fn preferences_file(&self) -> PathBuf {
        self.app_data_root.join(PREFERENCES_FILE_NAME)
    }

    pub fn previews_dir(&self) -> PathBuf {
        self.app_cache_root.join(PREVIEWS_DIR_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join(LOGS_DIR_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.app_config_root.join(CONFIG_FILE_NAME)
    }

    /// Kept office suite profiles used for slideshows.
    pub fn office_profiles_dir(&self) -> PathBuf {
        self.app_data_root.join(OFFICE_PROFILES_DIR_NAME)
    }
}
