//! Terminal commands that drive the window manager.
//!
//! Only window commands live here; the rest of the terminal's command table is owned by the
//! terminal app and falls through when [`execute_window_command`] returns `None`.

use crate::{
    config::{builtin_catalog, DesktopCatalog},
    window_manager::WindowManager,
};

/// Window the `exit` command closes.
pub const TERMINAL_WINDOW_ID: &str = "terminal";
/// Window the `projects` shortcut opens.
pub const PROJECTS_WINDOW_ID: &str = "projects";

/// Runs `line` against the built-in catalog. `None` means the command is not a window command.
pub fn execute_window_command(wm: &WindowManager, line: &str) -> Option<String> {
    execute_with_catalog(wm, builtin_catalog(), line)
}

/// Runs `line` against `catalog`.
///
/// The command word is matched case-insensitively; the `open` target is matched exactly.
pub fn execute_with_catalog(
    wm: &WindowManager,
    catalog: &DesktopCatalog,
    line: &str,
) -> Option<String> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_ascii_lowercase();
    match command.as_str() {
        "open" => Some(open_target(wm, catalog, words.next())),
        "projects" => {
            wm.open(PROJECTS_WINDOW_ID);
            Some("Opening Projects...".to_string())
        }
        "exit" => {
            wm.close(TERMINAL_WINDOW_ID);
            Some(String::new())
        }
        _ => None,
    }
}

fn open_target(wm: &WindowManager, catalog: &DesktopCatalog, target: Option<&str>) -> String {
    match target.filter(|target| catalog.terminal_targets().any(|id| id == *target)) {
        Some(target) => {
            wm.open(target);
            format!("Opening {target}...")
        }
        None => {
            let available = catalog.terminal_targets().collect::<Vec<_>>().join(", ");
            format!("Usage: open <window>\nAvailable: {available}")
        }
    }
}
