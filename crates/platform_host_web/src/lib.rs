//! Browser (`wasm32`) implementations of the [`desktop_wm`] seams.
//!
//! This crate turns the page markup into window-manager state and forwards browser events:
//! - `surface`: `.window` elements as [`desktop_wm::WindowSurface`]s
//! - `host`: viewport, icon focus, animation frames, randomness
//! - `focus`: keyboard-layer and start-menu focus queries
//! - `bindings`: delegated listeners plus the breakpoint media query
//! - `dom`: markup conventions and the page config override

pub mod bindings;
pub mod dom;
pub mod focus;
pub mod host;
pub mod surface;

pub use bindings::DesktopBindings;
pub use dom::page_config;
pub use focus::{DomKeyboardFocus, DomStartMenuSurface};
pub use host::BrowserDesktopHost;
pub use surface::DomWindowSurface;
