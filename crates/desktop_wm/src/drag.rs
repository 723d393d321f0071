//! Title-bar drag sessions.
//!
//! Mouse and touch each get their own `Idle -> Dragging -> Idle` slot. Only one slot may be
//! dragging at a time; a press while any slot is busy is rejected until its release.

use crate::{
    clamp::ClampBounds,
    error::WmError,
    model::{ElementSize, InputModality, PointerPosition, Position, Viewport, WindowId},
};

/// Everything captured at press time. Nothing here is re-measured while moving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_origin: PointerPosition,
    pub position_origin: Position,
    pub element: ElementSize,
    pub viewport: Viewport,
}

impl DragSession {
    /// Window position for `pointer` before clamping.
    pub fn proposed_position(&self, pointer: PointerPosition) -> Position {
        let dx = pointer.x.saturating_sub(self.pointer_origin.x);
        let dy = pointer.y.saturating_sub(self.pointer_origin.y);
        self.position_origin.offset(dx, dy)
    }

    /// Window position for `pointer` after clamping to the captured viewport.
    pub fn position_for(&self, pointer: PointerPosition, bounds: &ClampBounds) -> Position {
        bounds.clamp(self.proposed_position(pointer), self.element, self.viewport)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragTracker {
    pointer: DragState,
    touch: DragState,
}

impl DragTracker {
    pub fn state(&self, modality: InputModality) -> &DragState {
        match modality {
            InputModality::Pointer => &self.pointer,
            InputModality::Touch => &self.touch,
        }
    }

    fn slot_mut(&mut self, modality: InputModality) -> &mut DragState {
        match modality {
            InputModality::Pointer => &mut self.pointer,
            InputModality::Touch => &mut self.touch,
        }
    }

    pub fn session(&self, modality: InputModality) -> Option<&DragSession> {
        self.state(modality).session()
    }

    pub fn is_idle(&self) -> bool {
        matches!(
            (&self.pointer, &self.touch),
            (DragState::Idle, DragState::Idle)
        )
    }

    /// Window currently being dragged by either modality.
    pub fn dragging_window(&self) -> Option<&WindowId> {
        self.pointer
            .session()
            .or_else(|| self.touch.session())
            .map(|session| &session.window_id)
    }

    /// Arms a session for `modality`.
    ///
    /// # Errors
    ///
    /// [`WmError::DragRejected`] when any modality is already dragging.
    pub fn begin(&mut self, modality: InputModality, session: DragSession) -> Result<(), WmError> {
        if !self.is_idle() {
            return Err(WmError::DragRejected {
                modality,
                reason: "another drag is in progress",
            });
        }
        *self.slot_mut(modality) = DragState::Dragging(session);
        Ok(())
    }

    /// Returns `modality` to idle, yielding the finished session if there was one.
    pub fn end(&mut self, modality: InputModality) -> Option<DragSession> {
        match std::mem::take(self.slot_mut(modality)) {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Ends any session moving `id`.
    pub fn cancel_window(&mut self, id: &str) -> Option<DragSession> {
        for modality in [InputModality::Pointer, InputModality::Touch] {
            if self
                .session(modality)
                .is_some_and(|session| session.window_id == id)
            {
                return self.end(modality);
            }
        }
        None
    }

    /// Ends every session.
    pub fn cancel_all(&mut self) -> Vec<DragSession> {
        [InputModality::Pointer, InputModality::Touch]
            .into_iter()
            .filter_map(|modality| self.end(modality))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn session(id: &str) -> DragSession {
        DragSession {
            window_id: WindowId::new(id),
            pointer_origin: PointerPosition::new(100, 100),
            position_origin: Position::new(50, 50),
            element: ElementSize::new(400, 300),
            viewport: Viewport::new(1280, 800),
        }
    }

    #[test]
    fn move_delta_is_applied_to_origin_position() {
        let drag = session("about");
        let pointer = PointerPosition::new(130, 115);
        assert_eq!(drag.proposed_position(pointer), Position::new(80, 65));
        assert_eq!(
            drag.position_for(pointer, &ClampBounds::default()),
            Position::new(80, 65)
        );
    }

    #[test]
    fn moves_past_the_menu_bar_are_clamped() {
        let drag = session("about");
        let position = drag.position_for(PointerPosition::new(0, 0), &ClampBounds::default());
        assert_eq!(position, Position::new(0, 24));
    }

    #[test]
    fn second_press_while_dragging_is_rejected() {
        let mut tracker = DragTracker::default();
        tracker
            .begin(InputModality::Pointer, session("about"))
            .expect("first press");

        let err = tracker
            .begin(InputModality::Pointer, session("notes"))
            .expect_err("busy");
        assert!(matches!(err, WmError::DragRejected { .. }));
        assert_eq!(tracker.dragging_window().map(WindowId::as_str), Some("about"));
    }

    #[test]
    fn touch_press_is_rejected_while_mouse_drags() {
        let mut tracker = DragTracker::default();
        tracker
            .begin(InputModality::Pointer, session("about"))
            .expect("mouse");
        assert!(tracker.begin(InputModality::Touch, session("notes")).is_err());
        assert_eq!(tracker.state(InputModality::Touch), &DragState::Idle);
    }

    #[test]
    fn release_only_ends_its_own_modality() {
        let mut tracker = DragTracker::default();
        tracker
            .begin(InputModality::Touch, session("about"))
            .expect("touch");

        assert_eq!(tracker.end(InputModality::Pointer), None);
        assert!(!tracker.is_idle());
        assert_eq!(tracker.end(InputModality::Touch), Some(session("about")));
        assert!(tracker.is_idle());
    }

    #[test]
    fn cancel_window_leaves_other_windows_alone() {
        let mut tracker = DragTracker::default();
        tracker
            .begin(InputModality::Pointer, session("about"))
            .expect("mouse");
        assert_eq!(tracker.cancel_window("notes"), None);
        assert_eq!(tracker.cancel_window("about"), Some(session("about")));
        assert!(tracker.cancel_all().is_empty());
    }
}
