use std::path::PathBuf;

use pp_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "PowerPresenter";
const PROFILE_ENV: &str = "PP_PROFILE";

fn resolved_app_dir_name() -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

pub struct DirsAppDirsAdapter {
    base_dir_override: Option<PathBuf>,
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DirsAppDirsAdapter {
    /// Creates an adapter that resolves the system directories through `dirs`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pp_platform::app_dirs::DirsAppDirsAdapter;
    /// let _ = DirsAppDirsAdapter::new();
    /// ```
    pub fn new() -> Self {
        Self {
            base_dir_override: None,
        }
    }

    /// Creates an adapter that uses `base` instead of every system directory.
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            base_dir_override: Some(base),
        }
    }

    fn base_or(&self, system: fn() -> Option<PathBuf>) -> Option<PathBuf> {
        match &self.base_dir_override {
            Some(base) => Some(base.clone()),
            None => system(),
        }
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    /// Data and config roots come from the data-local and config directories,
    /// the cache root from the cache directory, each joined with
    /// `PowerPresenter` (or `PowerPresenter-<PP_PROFILE>`).
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base_data = self
            .base_or(dirs::data_local_dir)
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;
        let base_cache = self
            .base_or(dirs::cache_dir)
            .ok_or(AppDirsError::CacheDirUnavailable)?;
        let base_config = self
            .base_or(dirs::config_dir)
            .ok_or(AppDirsError::ConfigDirUnavailable)?;
        let app_dir_name = resolved_app_dir_name();

        Ok(AppDirs {
            app_data_root: base_data.join(&app_dir_name),
            app_cache_root: base_cache.join(&app_dir_name),
            app_config_root: base_config.join(&app_dir_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static PP_PROFILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_pp_profile<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _guard = PP_PROFILE_ENV_LOCK.lock().unwrap();
        let previous = std::env::var(PROFILE_ENV).ok();

        match value {
            Some(profile) => std::env::set_var(PROFILE_ENV, profile),
            None => std::env::remove_var(PROFILE_ENV),
        }

        let result = f();

        match previous {
            Some(profile) => std::env::set_var(PROFILE_ENV, profile),
            None => std::env::remove_var(PROFILE_ENV),
        }

        result
    }

    #[test]
    fn adapter_appends_app_dir_name() {
        with_pp_profile(None, || {
            let adapter = DirsAppDirsAdapter::with_base_dir(PathBuf::from("/tmp"));
            let dirs = adapter.get_app_dirs().unwrap();
            assert_eq!(dirs.app_data_root, PathBuf::from("/tmp/PowerPresenter"));
            assert_eq!(dirs.app_cache_root, PathBuf::from("/tmp/PowerPresenter"));
            assert_eq!(dirs.app_config_root, PathBuf::from("/tmp/PowerPresenter"));
            assert_eq!(
                dirs.previews_dir(),
                PathBuf::from("/tmp/PowerPresenter/Previews")
            );
        });
    }

    #[test]
    fn empty_profile_is_ignored() {
        with_pp_profile(Some(""), || {
            let adapter = DirsAppDirsAdapter::with_base_dir(PathBuf::from("/tmp"));
            let dirs = adapter.get_app_dirs().unwrap();
            assert!(dirs.app_data_root.ends_with("PowerPresenter"));
        });
    }

    #[test]
    fn adapter_isolates_dirs_for_different_profiles() {
        let dirs_a = with_pp_profile(Some("a"), || {
            DirsAppDirsAdapter::with_base_dir(PathBuf::from("/tmp"))
                .get_app_dirs()
                .unwrap()
        });
        let dirs_b = with_pp_profile(Some("b"), || {
            DirsAppDirsAdapter::with_base_dir(PathBuf::from("/tmp"))
                .get_app_dirs()
                .unwrap()
        });

        assert_eq!(dirs_a.app_data_root, PathBuf::from("/tmp/PowerPresenter-a"));
        assert_eq!(dirs_b.app_data_root, PathBuf::from("/tmp/PowerPresenter-b"));
        assert_ne!(dirs_a.preferences_file(), dirs_b.preferences_file());
        assert_ne!(dirs_a.previews_dir(), dirs_b.previews_dir());
    }
}
