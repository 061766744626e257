#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pp_core::ports::{
    AutomatedPresentation, AutomationError, DiscoveryError, DisplayPort, OpenOptions,
    PreferencesError, PreferencesPort, PresentationAutomationPort, PresentationDiscoveryPort,
    PresentationSurfacePort, PreviewStrategyPort, SlideExport, SlideShowSettings,
};
use pp_core::{
    Cancelled, PresentationEntry, PresentationItem, PreviewGenerationContext, PreviewResult,
    UserPreferences,
};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Presentations(Vec<String>),
    Previews(Vec<(String, Option<PathBuf>)>),
    Status(String),
    Busy(bool),
    Background(Option<PathBuf>),
}

#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<String> {
        self.statuses().pop()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn names(entries: &[PresentationEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.item.display_name().to_string())
        .collect()
}

impl PresentationSurfacePort for RecordingSurface {
    fn show_presentations(&self, entries: &[PresentationEntry]) {
        self.push(SurfaceEvent::Presentations(names(entries)));
    }

    fn show_previews(&self, entries: &[PresentationEntry]) {
        self.push(SurfaceEvent::Previews(
            entries
                .iter()
                .map(|e| (e.item.display_name().to_string(), e.preview.clone()))
                .collect(),
        ));
    }

    fn show_status(&self, message: &str) {
        self.push(SurfaceEvent::Status(message.to_string()));
    }

    fn set_busy(&self, busy: bool) {
        self.push(SurfaceEvent::Busy(busy));
    }

    fn show_background(&self, image: Option<&Path>) {
        self.push(SurfaceEvent::Background(image.map(Path::to_path_buf)));
    }
}

// ---------------------------------------------------------------------------
// Automation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum AutomationCall {
    Open(PathBuf, OpenOptions),
    Export(SlideExport),
    RunShow(SlideShowSettings),
    Close,
    Release,
}

#[derive(Default)]
pub struct FakeAutomation {
    pub calls: Arc<Mutex<Vec<AutomationCall>>>,
    pub unavailable: bool,
    pub fail_export: bool,
    pub fail_show: bool,
    /// Cancelled from inside `export_slide`, after the slide is written.
    pub cancel_on_export: Option<CancellationToken>,
}

impl FakeAutomation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn failing_export() -> Self {
        Self {
            fail_export: true,
            ..Self::default()
        }
    }

    pub fn failing_show() -> Self {
        Self {
            fail_show: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<AutomationCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&AutomationCall) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }
}

impl PresentationAutomationPort for FakeAutomation {
    fn open(
        &self,
        path: &Path,
        options: OpenOptions,
    ) -> Result<Box<dyn AutomatedPresentation>, AutomationError> {
        if self.unavailable {
            return Err(AutomationError::Unavailable("no presentation application".into()));
        }
        self.calls
            .lock()
            .unwrap()
            .push(AutomationCall::Open(path.to_path_buf(), options));
        Ok(Box::new(FakePresentation {
            calls: self.calls.clone(),
            fail_export: self.fail_export,
            fail_show: self.fail_show,
            cancel_on_export: self.cancel_on_export.clone(),
        }))
    }
}

struct FakePresentation {
    calls: Arc<Mutex<Vec<AutomationCall>>>,
    fail_export: bool,
    fail_show: bool,
    cancel_on_export: Option<CancellationToken>,
}

impl AutomatedPresentation for FakePresentation {
    fn export_slide(&mut self, export: &SlideExport) -> Result<(), AutomationError> {
        self.calls
            .lock()
            .unwrap()
            .push(AutomationCall::Export(export.clone()));
        if self.fail_export {
            return Err(AutomationError::Faulted("export failed".into()));
        }
        std::fs::write(&export.destination, b"exported-png")?;
        if let Some(token) = &self.cancel_on_export {
            token.cancel();
        }
        Ok(())
    }

    fn run_slideshow(&mut self, settings: &SlideShowSettings) -> Result<(), AutomationError> {
        self.calls
            .lock()
            .unwrap()
            .push(AutomationCall::RunShow(*settings));
        if self.fail_show {
            return Err(AutomationError::Faulted("show failed".into()));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), AutomationError> {
        self.calls.lock().unwrap().push(AutomationCall::Close);
        Ok(())
    }

    fn release(&mut self) {
        self.calls.lock().unwrap().push(AutomationCall::Release);
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Succeeds (writing the cache file) or fails for every handled path.
pub struct CountingStrategy {
    pub name: &'static str,
    pub succeed: bool,
    pub extension: Option<&'static str>,
    pub calls: AtomicUsize,
}

impl CountingStrategy {
    pub fn succeeding(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            succeed: true,
            extension: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            succeed: false,
            extension: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn only_for(name: &'static str, extension: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            succeed: true,
            extension: Some(extension),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PreviewStrategyPort for CountingStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn can_handle(&self, path: &Path) -> bool {
        match self.extension {
            Some(ext) => path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(ext)),
            None => true,
        }
    }

    async fn generate(
        &self,
        path: &Path,
        context: &PreviewGenerationContext,
        cancel: &CancellationToken,
    ) -> Result<PreviewResult, Cancelled> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        if !self.succeed {
            return Ok(PreviewResult::failure(format!("{} failed", self.name)));
        }
        let target = context.cache_path_for(path);
        std::fs::create_dir_all(context.cache_directory()).unwrap();
        std::fs::write(&target, self.name.as_bytes()).unwrap();
        Ok(PreviewResult::success(target))
    }
}

/// Blocks every generation until released or cancelled.
pub struct GatedStrategy {
    pub entered: AtomicUsize,
    pub started: Notify,
    pub gate: Notify,
    pub cancelled_seen: AtomicUsize,
}

impl GatedStrategy {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: AtomicUsize::new(0),
            started: Notify::new(),
            gate: Notify::new(),
            cancelled_seen: AtomicUsize::new(0),
        })
    }

    pub fn release_all(&self) {
        self.gate.notify_waiters();
    }
}

#[async_trait]
impl PreviewStrategyPort for GatedStrategy {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn can_handle(&self, _path: &Path) -> bool {
        true
    }

    async fn generate(
        &self,
        path: &Path,
        context: &PreviewGenerationContext,
        cancel: &CancellationToken,
    ) -> Result<PreviewResult, Cancelled> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        tokio::select! {
            _ = cancel.cancelled() => {
                self.cancelled_seen.fetch_add(1, Ordering::SeqCst);
                Err(Cancelled)
            }
            _ = self.gate.notified() => {
                Ok(PreviewResult::success(context.cache_path_for(path)))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

pub struct StaticDiscovery {
    pub items: Vec<PresentationItem>,
    pub calls: AtomicUsize,
}

impl StaticDiscovery {
    pub fn of(paths: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            items: paths.iter().map(|p| PresentationItem::from_path(*p)).collect(),
            calls: AtomicUsize::new(0),
        })
    }
}

impl PresentationDiscoveryPort for StaticDiscovery {
    fn discover(&self, _folder: &Path) -> Result<Vec<PresentationItem>, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.clone())
    }
}

pub struct FailingDiscovery;

impl PresentationDiscoveryPort for FailingDiscovery {
    fn discover(&self, folder: &Path) -> Result<Vec<PresentationItem>, DiscoveryError> {
        Err(DiscoveryError::ReadDir {
            path: folder.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        })
    }
}

// ---------------------------------------------------------------------------
// Preferences and displays
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryPreferences {
    pub stored: Mutex<Option<UserPreferences>>,
    pub saves: AtomicUsize,
    pub fail_load: bool,
    pub fail_save: bool,
}

impl InMemoryPreferences {
    pub fn with(preferences: UserPreferences) -> Arc<Self> {
        Arc::new(Self {
            stored: Mutex::new(Some(preferences)),
            ..Self::default()
        })
    }

    pub fn stored(&self) -> Option<UserPreferences> {
        self.stored.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

fn io_error(path: &str) -> PreferencesError {
    PreferencesError::Write {
        path: PathBuf::from(path),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
    }
}

#[async_trait]
impl PreferencesPort for InMemoryPreferences {
    async fn load(&self) -> Result<UserPreferences, PreferencesError> {
        if self.fail_load {
            return Err(PreferencesError::Read {
                path: PathBuf::from("prefs.json"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        Ok(self.stored().unwrap_or_default())
    }

    async fn save(&self, preferences: &UserPreferences) -> Result<(), PreferencesError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_save {
            return Err(io_error("prefs.json"));
        }
        *self.stored.lock().unwrap() = Some(preferences.clone());
        Ok(())
    }
}

pub struct FixedDisplays(pub bool);

impl DisplayPort for FixedDisplays {
    fn has_multiple_displays(&self) -> bool {
        self.0
    }
}

/// Context whose cache files live in `dir`, named after the file name.
pub fn context_in(dir: &Path) -> PreviewGenerationContext {
    let root = dir.to_path_buf();
    PreviewGenerationContext::new(dir, move |p: &Path| {
        let name = p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        root.join(format!("{name}.png"))
    })
}
