//! Window manager core for the retro desktop site.
//!
//! Owns window registration, open/close state, z-order, viewport clamping, title-bar drag, and the
//! desktop/mobile mode split. Presentation and browser services sit behind the traits in
//! [`surface`], [`keyboard`], and [`start_menu`]; `platform_host_web` implements them on the DOM.

pub mod clamp;
pub mod config;
pub mod drag;
pub mod error;
pub mod keyboard;
pub mod model;
pub mod registry;
pub mod shell;
pub mod stacking;
pub mod start_menu;
pub mod surface;
pub mod viewport;
pub mod window_manager;

#[cfg(test)]
mod testing;

pub use clamp::{clamp_position, ClampBounds};
pub use config::{builtin_catalog, CatalogWindow, ConfigError, DesktopCatalog, WindowManagerConfig};
pub use error::WmError;
pub use keyboard::{FocusWithin, KeyboardFocus, KeyboardNavigator, NavKey};
pub use model::*;
pub use shell::execute_window_command;
pub use start_menu::{StartMenu, StartMenuState, StartMenuSurface};
pub use surface::{DesktopHost, WindowSurface};
pub use viewport::ModeTransition;
pub use window_manager::{WindowManager, WindowsView};
