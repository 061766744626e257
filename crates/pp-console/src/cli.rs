use std::path::PathBuf;

use clap::Parser;

/// Browse a folder of PowerPoint decks and launch slideshows.
#[derive(Debug, Parser)]
#[command(name = "powerpresenter", version, about)]
pub struct Cli {
    /// Folder to list on startup
    pub folder: Option<PathBuf>,
}
