//! Write-then-rename helpers for cache files.
//!
//! The destination is either untouched or fully replaced. Concurrent writers
//! to the same destination each use their own temporary sibling, so the last
//! rename wins and the final file is always complete.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// `<dir>/<file name>.<uuid>.tmp`
pub fn sibling_temp_path(destination: &Path) -> PathBuf {
    let file_name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!("{file_name}.{}.tmp", uuid::Uuid::new_v4()))
}

/// Blocking: create a temporary sibling, let `write` fill it, then rename it
/// over `destination`. The temporary file is removed on every failure path.
pub fn persist_with<F>(destination: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let tmp_path = sibling_temp_path(destination);

    let written = File::create(&tmp_path).and_then(|mut file| {
        write(&mut file)?;
        file.flush()?;
        file.sync_all()
    });

    if let Err(err) = written.and_then(|()| std::fs::rename(&tmp_path, destination)) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}
