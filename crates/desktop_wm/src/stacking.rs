//! Z-order assignment and active-window arbitration.

use crate::{error::WmError, model::WindowId, registry::WindowRegistry};

/// Shared z-order counter plus the single active window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackingController {
    top_z_index: u32,
    active: Option<WindowId>,
}

impl StackingController {
    /// Starts the counter at `baseline`; the first fronted window gets `baseline + 1`.
    pub fn new(baseline: u32) -> Self {
        Self {
            top_z_index: baseline,
            active: None,
        }
    }

    pub fn top_z_index(&self) -> u32 {
        self.top_z_index
    }

    pub fn active(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    /// Raises `id` above every other window and makes it the only active one.
    ///
    /// The counter advances even when `id` is already in front.
    ///
    /// # Errors
    ///
    /// [`WmError::UnknownWindow`] for unregistered ids, [`WmError::WindowClosed`] for closed
    /// windows. Neither touches any state.
    pub fn bring_to_front(
        &mut self,
        registry: &mut WindowRegistry,
        id: &str,
    ) -> Result<u32, WmError> {
        let entry = registry
            .entry_mut(id)
            .ok_or_else(|| WmError::UnknownWindow(WindowId::new(id)))?;
        if !entry.descriptor.is_open {
            return Err(WmError::WindowClosed(entry.descriptor.id.clone()));
        }

        self.top_z_index = self.top_z_index.saturating_add(1);
        entry.descriptor.z_index = self.top_z_index;
        entry.surface.set_z_index(self.top_z_index);
        let fronted = entry.descriptor.id.clone();

        for window in registry.entries() {
            window.surface.set_active(window.descriptor.id == fronted);
        }
        self.active = Some(fronted);
        Ok(self.top_z_index)
    }

    /// Drops the active reference when it points at `id`. Returns whether it did.
    pub fn clear_if_active(&mut self, id: &str) -> bool {
        if self.active.as_ref().is_some_and(|active| active == id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::Position,
        testing::{RecordingSurface, SurfaceCall},
    };

    struct Fixture {
        registry: WindowRegistry,
        stacking: StackingController,
        surfaces: Vec<(&'static str, Rc<RecordingSurface>)>,
    }

    fn fixture(open: &[&'static str], closed: &[&'static str]) -> Fixture {
        let mut registry = WindowRegistry::default();
        let mut surfaces = Vec::new();
        for id in open.iter().chain(closed) {
            let surface = RecordingSurface::sized(300, 200);
            registry.register(WindowId::new(*id), surface.clone(), Position::new(100, 100), 100);
            surfaces.push((*id, surface));
        }
        for id in open {
            registry.entry_mut(id).expect("registered").descriptor.is_open = true;
        }
        Fixture {
            registry,
            stacking: StackingController::new(100),
            surfaces,
        }
    }

    fn active_surfaces(fixture: &Fixture) -> Vec<&'static str> {
        fixture
            .surfaces
            .iter()
            .filter(|(_, surface)| surface.is_active())
            .map(|(id, _)| *id)
            .collect()
    }

    #[test]
    fn fronting_assigns_increasing_z_above_baseline() {
        let mut f = fixture(&["about", "notes"], &[]);
        let a = f.stacking.bring_to_front(&mut f.registry, "about").expect("about");
        let b = f.stacking.bring_to_front(&mut f.registry, "notes").expect("notes");
        assert_eq!((a, b), (101, 102));
        assert_eq!(f.registry.get("notes").map(|w| w.z_index), Some(102));
        assert_eq!(f.surfaces[1].1.z_index(), Some(102));
    }

    #[test]
    fn refronting_the_same_window_still_advances_the_counter() {
        let mut f = fixture(&["about"], &[]);
        let first = f.stacking.bring_to_front(&mut f.registry, "about").expect("first");
        let second = f.stacking.bring_to_front(&mut f.registry, "about").expect("second");
        assert!(second > first);
        assert_eq!(f.stacking.active().map(WindowId::as_str), Some("about"));
    }

    #[test]
    fn active_marker_is_exclusive_after_any_sequence() {
        let mut f = fixture(&["about", "notes", "calc"], &[]);
        for id in ["notes", "about", "about", "calc", "notes"] {
            f.stacking.bring_to_front(&mut f.registry, id).expect("front");
            assert_eq!(active_surfaces(&f), vec![id]);
            assert_eq!(f.stacking.active().map(WindowId::as_str), Some(id));
            let max_open_z = f
                .registry
                .all()
                .filter(|(_, w)| w.is_open)
                .map(|(_, w)| w.z_index)
                .max();
            assert_eq!(f.registry.get(id).map(|w| w.z_index), max_open_z);
        }
    }

    #[test]
    fn unknown_window_is_rejected_without_side_effects() {
        let mut f = fixture(&["about"], &[]);
        let err = f
            .stacking
            .bring_to_front(&mut f.registry, "ghost")
            .expect_err("unknown");
        assert_eq!(err, WmError::UnknownWindow(WindowId::new("ghost")));
        assert_eq!(f.stacking.top_z_index(), 100);
        assert!(f.surfaces[0].1.calls().is_empty());
    }

    #[test]
    fn closed_window_cannot_become_active() {
        let mut f = fixture(&["about"], &["notes"]);
        let err = f
            .stacking
            .bring_to_front(&mut f.registry, "notes")
            .expect_err("closed");
        assert_eq!(err, WmError::WindowClosed(WindowId::new("notes")));
        assert!(f.stacking.active().is_none());
    }

    #[test]
    fn fronting_toggles_marker_on_every_surface() {
        let mut f = fixture(&["about", "notes"], &[]);
        f.stacking.bring_to_front(&mut f.registry, "notes").expect("notes");
        assert_eq!(
            f.surfaces[0].1.calls(),
            vec![SurfaceCall::Active(false)]
        );
        assert_eq!(
            f.surfaces[1].1.calls(),
            vec![SurfaceCall::ZIndex(101), SurfaceCall::Active(true)]
        );
    }

    #[test]
    fn clear_if_active_only_clears_matching_id() {
        let mut f = fixture(&["about"], &[]);
        f.stacking.bring_to_front(&mut f.registry, "about").expect("about");
        assert!(!f.stacking.clear_if_active("notes"));
        assert!(f.stacking.clear_if_active("about"));
        assert!(f.stacking.active().is_none());
    }
}
