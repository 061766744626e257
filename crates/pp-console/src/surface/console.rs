use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use pp_core::ports::PresentationSurfacePort;
use pp_core::PresentationEntry;
use tracing::debug;

/// Text rendering of the presentation surface.
///
/// Positions are printed 1-based, matching `launch <n>`.
pub struct ConsoleSurface<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(out, "{line}"))
            .and_then(|()| out.flush());
        if let Err(err) = result {
            debug!(error = %err, "console write failed");
        }
    }
}

fn list_lines(entries: &[PresentationEntry], with_previews: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    if entries.is_empty() {
        return lines;
    }
    lines.push("Presentations:".to_string());
    for (index, entry) in entries.iter().enumerate() {
        let name = entry.item.display_name();
        let line = match (&entry.preview, with_previews) {
            (Some(preview), true) => format!("  [{}] {name}  ({})", index + 1, preview.display()),
            (None, true) => format!("  [{}] {name}  (no preview)", index + 1),
            (_, false) => format!("  [{}] {name}", index + 1),
        };
        lines.push(line);
    }
    lines
}

impl<W: Write + Send> PresentationSurfacePort for ConsoleSurface<W> {
    fn show_presentations(&self, entries: &[PresentationEntry]) {
        self.write_lines(&list_lines(entries, false));
    }

    fn show_previews(&self, entries: &[PresentationEntry]) {
        self.write_lines(&list_lines(entries, true));
    }

    fn show_status(&self, message: &str) {
        self.write_lines(&[message.to_string()]);
    }

    fn set_busy(&self, busy: bool) {
        self.write_lines(&[if busy { "[busy]" } else { "[ready]" }.to_string()]);
    }

    fn show_background(&self, image: Option<&Path>) {
        let line = match image {
            Some(path) => format!("Background: {}", path.display()),
            None => "Background: none".to_string(),
        };
        self.write_lines(&[line]);
    }
}
