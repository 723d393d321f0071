//! Desktop/mobile breakpoint tracking and icon activation semantics.

use crate::model::{IconActivation, ViewportMode, WindowId};

/// Direction of a breakpoint crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    EnteredMobile,
    EnteredDesktop,
}

/// Tracks which side of the mobile breakpoint the viewport is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportModeController {
    breakpoint_px: i32,
    mode: ViewportMode,
}

impl ViewportModeController {
    pub fn new(breakpoint_px: i32, width: i32) -> Self {
        Self {
            breakpoint_px,
            mode: Self::mode_for_width(breakpoint_px, width),
        }
    }

    /// Widths strictly below the breakpoint are mobile.
    pub fn mode_for_width(breakpoint_px: i32, width: i32) -> ViewportMode {
        if width < breakpoint_px {
            ViewportMode::Mobile
        } else {
            ViewportMode::Desktop
        }
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn is_mobile(&self) -> bool {
        self.mode.is_mobile()
    }

    pub fn breakpoint_px(&self) -> i32 {
        self.breakpoint_px
    }

    /// Re-evaluates the breakpoint for a new width.
    pub fn observe_width(&mut self, width: i32) -> Option<ModeTransition> {
        self.set_mode(Self::mode_for_width(self.breakpoint_px, width))
    }

    /// Applies a breakpoint result computed elsewhere (a media query listener).
    pub fn set_mobile(&mut self, is_mobile: bool) -> Option<ModeTransition> {
        self.set_mode(if is_mobile {
            ViewportMode::Mobile
        } else {
            ViewportMode::Desktop
        })
    }

    fn set_mode(&mut self, mode: ViewportMode) -> Option<ModeTransition> {
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        Some(match mode {
            ViewportMode::Mobile => ModeTransition::EnteredMobile,
            ViewportMode::Desktop => ModeTransition::EnteredDesktop,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconClickState {
    #[default]
    Idle,
    Armed {
        icon: WindowId,
        armed_at_ms: u64,
    },
}

/// Double-click detector for desktop icons.
///
/// `Armed` expires on its own once the double-click window has passed, so no timer has to be
/// cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconClickTracker {
    window_ms: u64,
    state: IconClickState,
}

impl IconClickTracker {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            state: IconClickState::Idle,
        }
    }

    pub fn state(&self) -> &IconClickState {
        &self.state
    }

    /// Classifies a click on `icon` at `now_ms`.
    pub fn click(&mut self, icon: &WindowId, now_ms: u64, mode: ViewportMode) -> IconActivation {
        if mode.is_mobile() {
            self.state = IconClickState::Idle;
            return IconActivation::Open;
        }

        self.expire(now_ms);
        let second_click =
            matches!(&self.state, IconClickState::Armed { icon: armed, .. } if armed == icon);
        if second_click {
            self.state = IconClickState::Idle;
            IconActivation::Open
        } else {
            self.state = IconClickState::Armed {
                icon: icon.clone(),
                armed_at_ms: now_ms,
            };
            IconActivation::Select
        }
    }

    /// Drops an armed click older than the double-click window. Returns whether it did.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        let IconClickState::Armed { armed_at_ms, .. } = self.state else {
            return false;
        };
        if now_ms.saturating_sub(armed_at_ms) > self.window_ms {
            self.state = IconClickState::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn widths_below_breakpoint_are_mobile() {
        assert_eq!(
            ViewportModeController::mode_for_width(768, 767),
            ViewportMode::Mobile
        );
        assert_eq!(
            ViewportModeController::mode_for_width(768, 768),
            ViewportMode::Desktop
        );
    }

    #[test]
    fn transitions_are_reported_once() {
        let mut controller = ViewportModeController::new(768, 1280);
        assert_eq!(controller.observe_width(1024), None);
        assert_eq!(
            controller.observe_width(500),
            Some(ModeTransition::EnteredMobile)
        );
        assert_eq!(controller.set_mobile(true), None);
        assert_eq!(
            controller.set_mobile(false),
            Some(ModeTransition::EnteredDesktop)
        );
        assert!(!controller.is_mobile());
    }

    #[test]
    fn desktop_single_click_selects_then_double_click_opens() {
        let mut tracker = IconClickTracker::new(300);
        let about = WindowId::new("about");
        assert_eq!(
            tracker.click(&about, 1_000, ViewportMode::Desktop),
            IconActivation::Select
        );
        assert_eq!(
            tracker.click(&about, 1_250, ViewportMode::Desktop),
            IconActivation::Open
        );
        assert_eq!(tracker.state(), &IconClickState::Idle);
    }

    #[test]
    fn slow_second_click_only_selects_again() {
        let mut tracker = IconClickTracker::new(300);
        let about = WindowId::new("about");
        tracker.click(&about, 1_000, ViewportMode::Desktop);
        assert_eq!(
            tracker.click(&about, 1_301, ViewportMode::Desktop),
            IconActivation::Select
        );
        assert_eq!(
            tracker.state(),
            &IconClickState::Armed {
                icon: about,
                armed_at_ms: 1_301
            }
        );
    }

    #[test]
    fn clicking_a_different_icon_rearms_instead_of_opening() {
        let mut tracker = IconClickTracker::new(300);
        tracker.click(&WindowId::new("about"), 1_000, ViewportMode::Desktop);
        assert_eq!(
            tracker.click(&WindowId::new("notes"), 1_100, ViewportMode::Desktop),
            IconActivation::Select
        );
        assert_eq!(
            tracker.click(&WindowId::new("notes"), 1_200, ViewportMode::Desktop),
            IconActivation::Open
        );
    }

    #[test]
    fn mobile_clicks_open_immediately_and_disarm() {
        let mut tracker = IconClickTracker::new(300);
        let about = WindowId::new("about");
        tracker.click(&about, 1_000, ViewportMode::Desktop);
        assert_eq!(
            tracker.click(&about, 1_010, ViewportMode::Mobile),
            IconActivation::Open
        );
        assert_eq!(tracker.state(), &IconClickState::Idle);
    }

    #[test]
    fn armed_state_expires_by_itself() {
        let mut tracker = IconClickTracker::new(300);
        tracker.click(&WindowId::new("about"), 1_000, ViewportMode::Desktop);
        assert!(!tracker.expire(1_300));
        assert!(tracker.expire(1_301));
        assert_eq!(tracker.state(), &IconClickState::Idle);
    }
}
