use pp_core::ports::DisplayPort;
use tracing::debug;

/// Overrides detection with a fixed display count.
pub const DISPLAY_COUNT_ENV: &str = "PP_DISPLAY_COUNT";

/// Queries the host for attached displays on every call.
///
/// Detection failures count as a single display.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDisplays;

impl SystemDisplays {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayPort for SystemDisplays {
    fn has_multiple_displays(&self) -> bool {
        let count = display_count();
        debug!(?count, "display count");
        count.is_some_and(|n| n > 1)
    }
}

pub fn display_count() -> Option<u32> {
    if let Ok(value) = std::env::var(DISPLAY_COUNT_ENV) {
        if let Some(count) = parse_display_override(&value) {
            return Some(count);
        }
    }
    platform_display_count()
}

fn parse_display_override(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

/// Reads the `Monitors: N` header printed by `xrandr --listmonitors`.
pub fn parse_xrandr_monitors(output: &str) -> Option<u32> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("Monitors:"))
        .and_then(|count| count.trim().parse().ok())
}

#[cfg(windows)]
fn platform_display_count() -> Option<u32> {
    use winapi::um::winuser::{GetSystemMetrics, SM_CMONITORS};

    // SAFETY: GetSystemMetrics has no preconditions.
    let count = unsafe { GetSystemMetrics(SM_CMONITORS) };
    u32::try_from(count).ok().filter(|n| *n > 0)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_display_count() -> Option<u32> {
    let output = std::process::Command::new("xrandr")
        .arg("--listmonitors")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_xrandr_monitors(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
fn platform_display_count() -> Option<u32> {
    None
}
