//! Process entry: bootstrap, initial folder, then the command loop.

use std::sync::Arc;

use anyhow::Context;
use pp_app::PresenterSession;
use pp_core::ports::{AppDirsPort, PresentationSurfacePort};
use pp_platform::DirsAppDirsAdapter;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::bootstrap::config::{load_config_or_default, resolve_config_path};
use crate::bootstrap::tracing::init_tracing_subscriber;
use crate::bootstrap::wiring::wire_dependencies;
use crate::cli::Cli;
use crate::commands::{ConsoleCommand, ParseCommandError, HELP};
use crate::surface::ConsoleSurface;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let app_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve application directories")?;

    if let Err(err) = init_tracing_subscriber(&app_dirs) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let config_path = resolve_config_path(&app_dirs);
    let config = load_config_or_default(&config_path);
    info!(config = %config_path.display(), "starting PowerPresenter");

    let surface: Arc<dyn PresentationSurfacePort> = Arc::new(ConsoleSurface::stdout());
    let app = wire_dependencies(&config, &app_dirs, surface.clone())?;

    app.preferences.load().await;
    app.session.start();
    if let Some(folder) = cli.folder.as_deref() {
        app.session.set_initial_folder(folder).await;
    }

    run_commands(app.session, BufReader::new(tokio::io::stdin()), surface).await
}

/// Read commands line by line until `quit` or end of input.
///
/// Folder listings run in the background so a newer `open` or `refresh`
/// supersedes one still generating previews. The last one is awaited before
/// returning.
pub async fn run_commands<R>(
    session: Arc<PresenterSession>,
    input: R,
    surface: Arc<dyn PresentationSurfacePort>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut listing: Option<JoinHandle<()>> = None;

    while let Some(line) = lines.next_line().await.context("Failed to read command")? {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(err) => {
                surface.show_status(&err.to_string());
                continue;
            }
        };

        match command {
            ConsoleCommand::Open(folder) => {
                let session = session.clone();
                listing = Some(tokio::spawn(async move {
                    session.open_folder(&folder).await;
                }));
            }
            ConsoleCommand::Refresh => {
                let session = session.clone();
                listing = Some(tokio::spawn(async move {
                    session.refresh().await;
                }));
            }
            ConsoleCommand::List => surface.show_previews(&session.entries().await),
            ConsoleCommand::Launch(index) => {
                // Failures already reached the surface as status text.
                let _ = session.launch(index).await;
            }
            ConsoleCommand::Monitor(preference) => {
                session.change_monitor_preference(preference).await
            }
            ConsoleCommand::Background(image) => {
                if let Err(err) = session.set_background(image).await {
                    warn!(error = %err, "background save task failed");
                }
            }
            ConsoleCommand::Help => surface.show_status(HELP),
            ConsoleCommand::Quit => break,
        }
    }

    if let Some(handle) = listing {
        if let Err(err) = handle.await {
            warn!(error = %err, "folder listing task failed");
        }
    }
    Ok(())
}
