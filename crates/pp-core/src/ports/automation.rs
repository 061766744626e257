//! # Presentation Automation Port / 演示程序自动化端口
//!
//! A minimal view of an out-of-process presentation application: open a file,
//! export a slide, configure and run a slideshow, release.
//!
//! ## Resource rule / 资源规则
//!
//! Every [`AutomatedPresentation`] returned by [`PresentationAutomationPort::open`]
//! owns external resources (a live application, a document handle, scratch
//! files). Callers must call [`AutomatedPresentation::release`] on every exit
//! path. `release` is idempotent and implementations also release on drop.
//!
//! All methods block; run them on a blocking thread.

use std::path::{Path, PathBuf};

use crate::ports::errors::AutomationError;
use crate::preferences::MonitorPreference;

/// How the application should open a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    pub visible: bool,
    pub read_only: bool,
    pub with_window: bool,
}

impl OpenOptions {
    /// Invisible, read-only and without a document window.
    pub fn hidden_read_only() -> Self {
        Self {
            visible: false,
            read_only: true,
            with_window: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }
}

/// A single-slide image export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideExport {
    /// 1-based slide number.
    pub slide_index: u32,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideRange {
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideShowSettings {
    pub loop_until_stopped: bool,
    pub show_with_animation: bool,
    pub range: SlideRange,
    pub presenter_view: bool,
}

impl SlideShowSettings {
    /// No looping, animations on, all slides. Presenter view only for `Secondary`.
    pub fn for_preference(preference: MonitorPreference) -> Self {
        Self {
            loop_until_stopped: false,
            show_with_animation: true,
            range: SlideRange::All,
            presenter_view: preference == MonitorPreference::Secondary,
        }
    }
}

pub trait PresentationAutomationPort: Send + Sync {
    /// Open `path` in the external application.
    ///
    /// Returns [`AutomationError::Unavailable`] when the application cannot be reached.
    fn open(
        &self,
        path: &Path,
        options: OpenOptions,
    ) -> Result<Box<dyn AutomatedPresentation>, AutomationError>;
}

/// An open document inside the external application.
pub trait AutomatedPresentation: Send {
    fn export_slide(&mut self, export: &SlideExport) -> Result<(), AutomationError>;

    /// Apply `settings` and start the show. Returns once the show has started.
    fn run_slideshow(&mut self, settings: &SlideShowSettings) -> Result<(), AutomationError>;

    /// Close the document. Not called when a running show must stay up.
    fn close(&mut self) -> Result<(), AutomationError>;

    /// Drop every external reference held by this handle.
    fn release(&mut self);
}
