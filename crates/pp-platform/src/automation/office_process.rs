//! # Office Process Automation / 办公套件进程自动化
//!
//! Drives an external office suite executable (LibreOffice `soffice` by
//! default) as a child process.
//!
//! - export: a headless `--convert-to png` run into a private scratch
//!   directory, rescaled to the requested size.
//! - slideshow: `--show <file>`, detached, against a kept per-mode user
//!   profile whose `registrymodifications.xcu` switches the Impress
//!   presenter console on or off. Looping and animations are document
//!   settings in Impress and are left to the file.
//!
//! Every call blocks until the child process finishes (export) or has been
//! spawned (slideshow).

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use image::imageops::FilterType;
use image::ImageFormat;
use pp_core::ports::{
    AutomatedPresentation, AutomationError, OpenOptions, PresentationAutomationPort, SlideExport,
    SlideShowSettings,
};
use tracing::{debug, info, warn};

pub const DEFAULT_PROGRAM: &str = "soffice";

const REGISTRY_FILE: &str = "registrymodifications.xcu";
const PRESENTER_SCREEN_KEY: &str = "EnablePresenterScreen";

pub struct OfficeProcessAutomation {
    program: String,
    scratch_root: PathBuf,
    profile_root: PathBuf,
}

impl OfficeProcessAutomation {
    pub fn new(program: impl Into<String>) -> Self {
        let temp = std::env::temp_dir().join("PowerPresenter");
        Self {
            program: program.into(),
            profile_root: temp.join("office-profiles"),
            scratch_root: temp,
        }
    }

    pub fn with_scratch_root(mut self, scratch_root: impl Into<PathBuf>) -> Self {
        self.scratch_root = scratch_root.into();
        self
    }

    /// Where the kept slideshow profiles live, one per presenter mode.
    pub fn with_profile_root(mut self, profile_root: impl Into<PathBuf>) -> Self {
        self.profile_root = profile_root.into();
        self
    }

    /// Absolute executable path, looked up on `PATH` for bare names.
    fn resolve_program(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 || program.is_absolute() {
            return program.is_file().then(|| program.to_path_buf());
        }

        let path_var = std::env::var_os("PATH")?;
        std::env::split_paths(&path_var).find_map(|dir| {
            let candidates = [dir.join(program), dir.join(format!("{}.exe", self.program))];
            candidates.into_iter().find(|c| c.is_file())
        })
    }
}

impl Default for OfficeProcessAutomation {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl PresentationAutomationPort for OfficeProcessAutomation {
    fn open(
        &self,
        path: &Path,
        options: OpenOptions,
    ) -> Result<Box<dyn AutomatedPresentation>, AutomationError> {
        if !path.is_file() {
            return Err(AutomationError::Faulted(format!(
                "file not found: {}",
                path.display()
            )));
        }

        let program = self.resolve_program().ok_or_else(|| {
            AutomationError::Unavailable(format!("{} is not installed", self.program))
        })?;

        let scratch = self.scratch_root.join(uuid::Uuid::new_v4().to_string());
        std::fs::create_dir_all(&scratch)?;

        debug!(
            program = %program.display(),
            path = %path.display(),
            visible = options.visible,
            read_only = options.read_only,
            "opened presentation for automation"
        );

        Ok(Box::new(OfficeProcessPresentation {
            program,
            document: path.to_path_buf(),
            options,
            profile_root: self.profile_root.clone(),
            scratch: Some(scratch),
            show: None,
        }))
    }
}

/// One document handle. Owns a scratch directory and, once a show has been
/// started, the show process.
pub struct OfficeProcessPresentation {
    program: PathBuf,
    document: PathBuf,
    options: OpenOptions,
    profile_root: PathBuf,
    scratch: Option<PathBuf>,
    show: Option<Child>,
}

impl OfficeProcessPresentation {
    fn scratch(&self) -> Result<&Path, AutomationError> {
        self.scratch.as_deref().ok_or_else(|| {
            AutomationError::Faulted("presentation handle already released".into())
        })
    }

    fn spawn_error(&self, err: io::Error) -> AutomationError {
        if err.kind() == io::ErrorKind::NotFound {
            AutomationError::Unavailable(format!(
                "{} could not be started",
                self.program.display()
            ))
        } else {
            AutomationError::Io(err)
        }
    }
}

impl AutomatedPresentation for OfficeProcessPresentation {
    fn export_slide(&mut self, export: &SlideExport) -> Result<(), AutomationError> {
        let scratch = self.scratch()?.to_path_buf();
        if export.slide_index != 1 {
            return Err(AutomationError::Faulted(format!(
                "only the first slide can be exported, got slide {}",
                export.slide_index
            )));
        }

        let output = Command::new(&self.program)
            .arg("--headless")
            .arg("--norestore")
            .arg(format!(
                "-env:UserInstallation={}",
                file_url(&scratch.join("profile"))
            ))
            .arg("--convert-to")
            .arg(export.format.extension())
            .arg("--outdir")
            .arg(&scratch)
            .arg(&self.document)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| self.spawn_error(err))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AutomationError::Faulted(format!(
                "export exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stem = self
            .document
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let exported = scratch.join(format!("{stem}.{}", export.format.extension()));
        if !exported.is_file() {
            return Err(AutomationError::Faulted("export produced no image".into()));
        }

        let image = image::open(&exported)
            .map_err(|err| AutomationError::Faulted(format!("unreadable export: {err}")))?;
        image
            .resize_exact(export.width, export.height, FilterType::Triangle)
            .save_with_format(&export.destination, ImageFormat::Png)
            .map_err(|err| AutomationError::Faulted(format!("failed to write export: {err}")))?;

        debug!(
            path = %self.document.display(),
            destination = %export.destination.display(),
            width = export.width,
            height = export.height,
            "exported slide"
        );
        Ok(())
    }

    fn run_slideshow(&mut self, settings: &SlideShowSettings) -> Result<(), AutomationError> {
        self.scratch()?;
        if self.show.is_some() {
            return Err(AutomationError::Faulted("slideshow already running".into()));
        }

        if settings.loop_until_stopped || !settings.show_with_animation {
            warn!(
                loop_until_stopped = settings.loop_until_stopped,
                show_with_animation = settings.show_with_animation,
                "loop and animation follow the document's own show settings"
            );
        }
        let profile = prepare_show_profile(&self.profile_root, settings)?;

        let child = Command::new(&self.program)
            .arg("--norestore")
            .arg(format!("-env:UserInstallation={}", file_url(&profile)))
            .arg("--show")
            .arg(&self.document)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| self.spawn_error(err))?;

        info!(
            path = %self.document.display(),
            pid = child.id(),
            profile = %profile.display(),
            presenter_view = settings.presenter_view,
            loop_until_stopped = settings.loop_until_stopped,
            show_with_animation = settings.show_with_animation,
            range = ?settings.range,
            read_only = self.options.read_only,
            "slideshow started"
        );
        self.show = Some(child);
        Ok(())
    }

    fn close(&mut self) -> Result<(), AutomationError> {
        if let Some(mut child) = self.show.take() {
            match child.kill() {
                Ok(()) => {}
                // Already exited.
                Err(err) if err.kind() == io::ErrorKind::InvalidInput => {}
                Err(err) => return Err(AutomationError::Io(err)),
            }
            child.wait()?;
        }
        Ok(())
    }

    fn release(&mut self) {
        // A started show keeps running after release.
        self.show = None;

        if let Some(scratch) = self.scratch.take() {
            if let Err(err) = std::fs::remove_dir_all(&scratch) {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(
                        scratch = %scratch.display(),
                        error = %err,
                        "failed to remove scratch dir"
                    );
                }
            }
        }
    }
}

impl Drop for OfficeProcessPresentation {
    fn drop(&mut self) {
        self.release();
    }
}

/// Seeds the profile used for a show in this presenter mode and returns it.
///
/// The profile is kept between shows. Only the presenter-screen entry is
/// rewritten; everything else the office suite stored there is preserved.
fn prepare_show_profile(root: &Path, settings: &SlideShowSettings) -> io::Result<PathBuf> {
    let name = if settings.presenter_view {
        "show-presenter"
    } else {
        "show-single"
    };
    let profile = root.join(name);
    let user = profile.join("user");
    std::fs::create_dir_all(&user)?;

    let registry = user.join(REGISTRY_FILE);
    let existing = match std::fs::read_to_string(&registry) {
        Ok(existing) => Some(existing),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(err),
    };
    let updated = registry_modifications(existing.as_deref(), settings.presenter_view);
    if existing.as_deref() != Some(updated.as_str()) {
        std::fs::write(&registry, updated)?;
    }
    Ok(profile)
}

fn presenter_screen_item(enabled: bool) -> String {
    format!(
        concat!(
            r#"<item oor:path="/org.openoffice.Office.Impress/Misc/Start">"#,
            r#"<prop oor:name="{}" oor:op="fuse"><value>{}</value></prop></item>"#,
        ),
        PRESENTER_SCREEN_KEY, enabled
    )
}

/// `existing` with its presenter-screen entry replaced, or a fresh file.
fn registry_modifications(existing: Option<&str>, presenter_view: bool) -> String {
    const CLOSING: &str = "</oor:items>";
    let item = presenter_screen_item(presenter_view);
    let key = format!(r#"oor:name="{PRESENTER_SCREEN_KEY}""#);

    match existing.filter(|text| text.contains(CLOSING)) {
        Some(text) => {
            let mut out = String::with_capacity(text.len() + item.len());
            for line in text.lines().filter(|line| !line.contains(&key)) {
                if let Some(at) = line.find(CLOSING) {
                    out.push_str(&line[..at]);
                    out.push_str(&item);
                    out.push('\n');
                    out.push_str(&line[at..]);
                } else {
                    out.push_str(line);
                }
                out.push('\n');
            }
            out
        }
        None => format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <oor:items xmlns:oor=\"http://openoffice.org/2001/registry\" \
             xmlns:xs=\"http://www.w3.org/2001/XMLSchema\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\n\
             {item}\n\
             {CLOSING}\n"
        ),
    }
}

/// `file://` URL for `path`, as the office suite expects for `-env:` options.
fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/").replace(' ', "%20");
    if raw.starts_with('/') {
        format!("file://{raw}")
    } else {
        format!("file:///{raw}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_urls() {
        assert_eq!(file_url(Path::new("/tmp/pp/profile")), "file:///tmp/pp/profile");
        assert_eq!(
            file_url(Path::new("/tmp/my decks/profile")),
            "file:///tmp/my%20decks/profile"
        );
    }

    const SETUP_ITEM: &str = concat!(
        r#"<item oor:path="/org.openoffice.Setup/Office">"#,
        r#"<prop oor:name="ooSetupInstCompleted" oor:op="fuse"><value>true</value></prop></item>"#,
    );

    fn registry_in(profile: &Path) -> String {
        std::fs::read_to_string(profile.join("user").join(REGISTRY_FILE)).unwrap()
    }

    #[test]
    fn show_profiles_are_seeded_per_presenter_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let presenter = SlideShowSettings::for_preference(pp_core::MonitorPreference::Secondary);
        let single = SlideShowSettings::for_preference(pp_core::MonitorPreference::Primary);

        let presenter_profile = prepare_show_profile(tmp.path(), &presenter).unwrap();
        let single_profile = prepare_show_profile(tmp.path(), &single).unwrap();

        assert_ne!(presenter_profile, single_profile);
        assert!(presenter_profile.starts_with(tmp.path()));

        let presenter_xcu = registry_in(&presenter_profile);
        assert!(presenter_xcu.starts_with("<?xml"));
        assert!(presenter_xcu.contains(&presenter_screen_item(true)));
        assert!(presenter_xcu.contains("<value>true</value>"));

        let single_xcu = registry_in(&single_profile);
        assert!(single_xcu.contains(&presenter_screen_item(false)));
        assert!(!single_xcu.contains("<value>true</value>"));

        // Kept and unchanged on the next show.
        assert_eq!(prepare_show_profile(tmp.path(), &single).unwrap(), single_profile);
        assert_eq!(registry_in(&single_profile), single_xcu);
    }

    #[test]
    fn existing_registry_keeps_other_entries() {
        let existing = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <oor:items xmlns:oor=\"http://openoffice.org/2001/registry\">\n\
             {SETUP_ITEM}\n\
             {}\n\
             </oor:items>\n",
            presenter_screen_item(true)
        );

        let updated = registry_modifications(Some(&existing), false);

        assert!(updated.contains(SETUP_ITEM));
        assert_eq!(updated.matches(PRESENTER_SCREEN_KEY).count(), 1);
        assert!(updated.contains(&presenter_screen_item(false)));
        assert!(updated.trim_end().ends_with("</oor:items>"));
        assert_eq!(registry_modifications(Some(&updated), false), updated);
    }

    #[test]
    fn release_is_idempotent_and_removes_scratch() {
        let tmp = tempfile::tempdir().unwrap();
        let scratch = tmp.path().join("scratch");
        std::fs::create_dir_all(&scratch).unwrap();

        let mut handle = OfficeProcessPresentation {
            program: PathBuf::from("soffice"),
            document: tmp.path().join("Demo.pptx"),
            options: OpenOptions::hidden_read_only(),
            profile_root: tmp.path().join("profiles"),
            scratch: Some(scratch.clone()),
            show: None,
        };

        handle.release();
        assert!(!scratch.exists());
        handle.release();

        let err = handle
            .run_slideshow(&SlideShowSettings::for_preference(
                pp_core::MonitorPreference::Primary,
            ))
            .unwrap_err();
        assert!(matches!(err, AutomationError::Faulted(_)));
    }
}
