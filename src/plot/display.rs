//! Best-effort viewing of a saved chart

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// Whether a graphical session is reachable, given an environment lookup
fn has_display<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| lookup(*var).is_some_and(|v| !v.is_empty()))
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open `path` in the platform image viewer.
///
/// Never fails: a missing display or viewer is logged and reported as `false`.
/// Call only after the image has been written.
pub fn show_best_effort(path: &Path) -> bool {
    if !has_display(|var| std::env::var_os(var)) {
        tracing::info!("no display available, skipping chart preview");
        return false;
    }

    let spawned = viewer_command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "could not open chart viewer");
            false
        }
    }
}
