use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pp_core::ports::{PreferencesError, PreferencesPort};
use pp_core::UserPreferences;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::sibling_temp_path;

/// JSON file holding [`UserPreferences`], pretty-printed.
pub struct FilePreferencesRepository {
    path: PathBuf,
    // Serializes saves from concurrently spawned update tasks.
    write_lock: Mutex<()>,
}

impl FilePreferencesRepository {
    /// Creates a repository backed by the file at `path`.
    ///
    /// Nothing is read or created until [`PreferencesPort::load`] or
    /// [`PreferencesPort::save`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> PreferencesError {
        PreferencesError::Write {
            path: self.path.clone(),
            source,
        }
    }

    async fn atomic_write(&self, content: &str) -> Result<(), PreferencesError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let tmp_path = sibling_temp_path(&self.path);
        if let Err(err) = fs::write(&tmp_path, content).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(self.write_error(err));
        }

        if let Err(err) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(self.write_error(err));
        }

        Ok(())
    }
}

#[async_trait]
impl PreferencesPort for FilePreferencesRepository {
    /// Loads preferences from the repository path.
    ///
    /// A missing file and a file that does not parse both yield
    /// `UserPreferences::default()`. Only other read failures are errors.
    async fn load(&self) -> Result<UserPreferences, PreferencesError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no preferences file, using defaults");
                return Ok(UserPreferences::default());
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                warn!(path = %self.path.display(), "preferences file is not UTF-8, using defaults");
                return Ok(UserPreferences::default());
            }
            Err(source) => {
                return Err(PreferencesError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(preferences) => Ok(preferences),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "preferences file is malformed, using defaults"
                );
                Ok(UserPreferences::default())
            }
        }
    }

    /// Persist preferences as pretty-printed JSON, atomically.
    async fn save(&self, preferences: &UserPreferences) -> Result<(), PreferencesError> {
        let content = serde_json::to_string_pretty(preferences)?;

        let _guard = self.write_lock.lock().await;
        self.atomic_write(&content).await?;
        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}
