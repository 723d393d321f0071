//! Presentation and environment seams.
//!
//! The core never touches DOM APIs. Browser adapters implement these traits in
//! `platform_host_web`; tests use recording doubles.

use crate::model::{ElementSize, Position, Viewport, WindowId};

/// Visual surface of one window.
pub trait WindowSurface {
    /// Reveals the surface.
    fn show(&self);
    /// Hides the surface.
    fn hide(&self);
    /// Applies a stacking order.
    fn set_z_index(&self, z_index: u32);
    /// Moves the surface to `position`.
    fn set_position(&self, position: Position);
    /// Adds or removes the active-window marker.
    fn set_active(&self, active: bool);
    /// Measures the surface as currently laid out.
    fn size(&self) -> ElementSize;
    /// Focuses the first focusable control inside the surface; `false` when there is none.
    fn focus_first(&self) -> bool;
    /// Hints that the surface is (or stops) being moved every frame.
    fn set_drag_hint(&self, _dragging: bool) {}
}

/// Environment services the window manager needs beyond individual surfaces.
pub trait DesktopHost {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;
    /// Focuses the desktop icon that launches `id`; `false` when no such icon exists.
    fn focus_icon(&self, id: &WindowId) -> bool;
    /// Highlights the icon for `id` and clears the highlight from every other icon.
    fn select_icon(&self, id: &WindowId);
    /// Runs `task` at the next render opportunity.
    fn schedule_frame(&self, task: Box<dyn FnOnce()>);
    /// Uniform value in `[0, 1)` used for default window offsets.
    fn random_fraction(&self) -> f64;
}
