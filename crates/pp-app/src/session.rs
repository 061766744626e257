//! # Presenter Session / 演示会话
//!
//! Owns the state a presenter window would own (current folder, current
//! list, preferences) and exposes the user operations. All output goes to the
//! [`PresentationSurfacePort`]. Errors are shown as status text; the methods
//! return outcomes for callers that want them.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, Result};
use pp_core::ports::{DisplayPort, PresentationLauncherPort, PresentationSurfacePort};
use pp_core::{MonitorPreference, PresentationEntry};
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

use crate::deps::AppDeps;
use crate::messages;
use crate::preferences::PreferencesService;
use crate::usecases::{RefreshOutcome, RefreshPresentations};

pub struct PresenterSession {
    refresh: RefreshPresentations,
    launcher: Arc<dyn PresentationLauncherPort>,
    displays: Arc<dyn DisplayPort>,
    preferences: Arc<PreferencesService>,
    surface: Arc<dyn PresentationSurfacePort>,
    folder: Mutex<Option<PathBuf>>,
}

impl PresenterSession {
    pub fn new(deps: AppDeps) -> Self {
        Self {
            refresh: RefreshPresentations::new(deps.discovery, deps.pipeline, deps.surface.clone()),
            launcher: deps.launcher,
            displays: deps.displays,
            preferences: deps.preferences,
            surface: deps.surface,
            folder: Mutex::new(None),
        }
    }

    /// Publish the background from the loaded preferences and report the
    /// attached displays.
    pub fn start(&self) {
        self.publish_background(self.preferences.current().background_image_path.as_deref());
        let multiple = self.displays.has_multiple_displays();
        self.surface.show_status(messages::monitors(multiple));
    }

    pub fn current_folder(&self) -> Option<PathBuf> {
        self.folder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn remember_folder(&self, folder: &Path) {
        *self.folder.lock().unwrap_or_else(PoisonError::into_inner) = Some(folder.to_path_buf());
    }

    /// Folder passed on the command line. A missing folder is reported, not
    /// remembered.
    pub async fn set_initial_folder(&self, folder: &Path) -> RefreshOutcome {
        if !folder.is_dir() {
            warn!(folder = %folder.display(), "initial folder does not exist");
            self.surface.show_status(messages::INITIAL_FOLDER_MISSING);
            return RefreshOutcome::FolderMissing;
        }
        self.remember_folder(folder);
        self.refresh().await
    }

    pub async fn open_folder(&self, folder: &Path) -> RefreshOutcome {
        self.remember_folder(folder);
        self.refresh().await
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(folder) = self.current_folder() else {
            self.surface.show_status(messages::SELECT_FOLDER);
            return RefreshOutcome::NoFolder;
        };
        if !folder.is_dir() {
            self.refresh.cancel_current(messages::FOLDER_GONE).await;
            return RefreshOutcome::FolderMissing;
        }
        self.refresh.execute(&folder).await
    }

    pub async fn entries(&self) -> Vec<PresentationEntry> {
        self.refresh.entries().await
    }

    /// Launch the entry at `index` (zero-based) of the current list.
    pub async fn launch(&self, index: usize) -> Result<()> {
        let entries = self.entries().await;
        let Some(entry) = entries.get(index) else {
            self.surface.show_status(&messages::no_presentation_at(index + 1));
            return Err(anyhow!("no presentation at index {index}"));
        };

        let path = entry.item.file_path().to_path_buf();
        let preference = self.preferences.current().monitor_preference;
        let span = info_span!("session.launch", path = %path.display(), preference = ?preference);

        let result = self.launcher.launch(&path, preference).instrument(span.clone()).await;
        let _entered = span.enter();
        match result {
            Ok(()) => {
                info!("presentation launched");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "launch failed");
                self.surface.show_status(&messages::open_failed(&err.to_string()));
                Err(anyhow::Error::new(err))
            }
        }
    }

    pub async fn change_monitor_preference(&self, preference: MonitorPreference) {
        if let Err(err) = self
            .preferences
            .update_and_save(|p| p.monitor_preference = preference)
            .await
        {
            warn!(error = %err, "failed to save monitor preference");
        }
        self.surface.show_status(&messages::monitor_mode(preference));
    }

    /// Set or clear the background image. The save runs in the background.
    pub fn set_background(&self, image: Option<PathBuf>) -> JoinHandle<()> {
        self.publish_background(image.as_deref());
        self.preferences
            .update(move |p| p.background_image_path = image)
    }

    pub fn monitor_preference_label(&self) -> &'static str {
        self.preferences.current().monitor_preference.label()
    }

    fn publish_background(&self, image: Option<&Path>) {
        let existing = image.filter(|path| path.is_file());
        self.surface.show_background(existing);
    }
}
