//! # Preferences Service / 偏好设置服务
//!
//! The single in-memory [`UserPreferences`] of a process, constructed
//! explicitly and passed to whoever needs it.
//!
//! Lifecycle: `load` once at startup, read with `current`, change with
//! `update` (saves in the background) or `update_and_save` (awaits the save).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pp_core::ports::{PreferencesError, PreferencesPort};
use pp_core::UserPreferences;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct PreferencesService {
    port: Arc<dyn PreferencesPort>,
    current: Arc<Mutex<UserPreferences>>,
    // Saves run one at a time and always write the latest state.
    save_lock: Arc<tokio::sync::Mutex<()>>,
}

fn lock(current: &Mutex<UserPreferences>) -> MutexGuard<'_, UserPreferences> {
    current.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PreferencesService {
    /// Starts with defaults; call [`PreferencesService::load`] before use.
    pub fn new(port: Arc<dyn PreferencesPort>) -> Self {
        Self {
            port,
            current: Arc::new(Mutex::new(UserPreferences::default())),
            save_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Replace the in-memory state with the stored one. Read failures fall
    /// back to defaults.
    pub async fn load(&self) -> UserPreferences {
        let loaded = match self.port.load().await {
            Ok(preferences) => preferences,
            Err(err) => {
                warn!(error = %err, "failed to load preferences, using defaults");
                UserPreferences::default()
            }
        };
        *lock(&self.current) = loaded.clone();
        debug!(?loaded, "preferences loaded");
        loaded
    }

    pub fn current(&self) -> UserPreferences {
        lock(&self.current).clone()
    }

    fn apply<F>(&self, change: F) -> UserPreferences
    where
        F: FnOnce(&mut UserPreferences),
    {
        let mut guard = lock(&self.current);
        change(&mut guard);
        guard.clone()
    }

    /// Change the preferences and save them in the background.
    ///
    /// Save failures are logged. The returned handle completes after the save.
    pub fn update<F>(&self, change: F) -> JoinHandle<()>
    where
        F: FnOnce(&mut UserPreferences),
    {
        self.apply(change);

        let port = self.port.clone();
        let current = self.current.clone();
        let save_lock = self.save_lock.clone();
        tokio::spawn(async move {
            let _guard = save_lock.lock().await;
            let latest = lock(&current).clone();
            if let Err(err) = port.save(&latest).await {
                warn!(error = %err, "failed to save preferences");
            }
        })
    }

    /// Change the preferences and wait for them to be saved.
    pub async fn update_and_save<F>(&self, change: F) -> Result<UserPreferences, PreferencesError>
    where
        F: FnOnce(&mut UserPreferences),
    {
        self.apply(change);

        let _guard = self.save_lock.lock().await;
        let latest = self.current();
        self.port.save(&latest).await?;
        Ok(latest)
    }
}
