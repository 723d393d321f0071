//! Canonical per-window state store.
//!
//! Windows are registered once by the page scan and never removed. Registration order is the only
//! iteration order.

use std::{fmt, rc::Rc};

use crate::{
    config::WindowManagerConfig,
    model::{Position, WindowDescriptor, WindowId},
    surface::WindowSurface,
};

/// A descriptor paired with the surface it drives.
pub struct RegisteredWindow {
    pub descriptor: WindowDescriptor,
    pub surface: Rc<dyn WindowSurface>,
}

impl fmt::Debug for RegisteredWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredWindow")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Vec<RegisteredWindow>,
}

impl WindowRegistry {
    /// Adds a closed window at `position`; returns `false` (and changes nothing) if `id` exists.
    pub fn register(
        &mut self,
        id: WindowId,
        surface: Rc<dyn WindowSurface>,
        position: Position,
        z_index: u32,
    ) -> bool {
        if self.contains(id.as_str()) {
            return false;
        }
        self.windows.push(RegisteredWindow {
            descriptor: WindowDescriptor {
                id,
                is_open: false,
                position,
                z_index,
            },
            surface,
        });
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.windows.iter().any(|w| w.descriptor.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WindowDescriptor> {
        self.entry(id).map(|w| &w.descriptor)
    }

    pub fn entry(&self, id: &str) -> Option<&RegisteredWindow> {
        self.windows.iter().find(|w| w.descriptor.id == id)
    }

    pub fn entry_mut(&mut self, id: &str) -> Option<&mut RegisteredWindow> {
        self.windows.iter_mut().find(|w| w.descriptor.id == id)
    }

    pub fn surface(&self, id: &str) -> Option<Rc<dyn WindowSurface>> {
        self.entry(id).map(|w| Rc::clone(&w.surface))
    }

    /// `(id, descriptor)` pairs in registration order. Call again (or clone) to restart.
    pub fn all(&self) -> impl Iterator<Item = (&WindowId, &WindowDescriptor)> + Clone + '_ {
        self.windows
            .iter()
            .map(|w| (&w.descriptor.id, &w.descriptor))
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegisteredWindow> + '_ {
        self.windows.iter()
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut RegisteredWindow> + '_ {
        self.windows.iter_mut()
    }

    pub fn open_ids(&self) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.descriptor.is_open)
            .map(|w| w.descriptor.id.clone())
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.windows.iter().filter(|w| w.descriptor.is_open).count()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Resolves a window's starting position, drawing a random offset for each missing axis.
pub fn default_position(
    default_x: Option<i32>,
    default_y: Option<i32>,
    config: &WindowManagerConfig,
    mut random_fraction: impl FnMut() -> f64,
) -> Position {
    let mut offset = || {
        let fraction = random_fraction();
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let span = config.default_offset_span_px.max(0);
        let extra = ((fraction * f64::from(span)).floor() as i32).min((span - 1).max(0));
        config.default_offset_min_px.saturating_add(extra)
    };
    let x = default_x.unwrap_or_else(&mut offset);
    let y = default_y.unwrap_or_else(&mut offset);
    Position::new(x, y)
}
