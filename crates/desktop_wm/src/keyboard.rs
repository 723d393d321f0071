//! Desktop keyboard handling: close, focus trap, and icon navigation.
//!
//! Index math lives in pure helpers ([`trap_focus`], [`navigate_icons`]); [`KeyboardNavigator`]
//! wires them to the window manager and a [`KeyboardFocus`] implementation.

use std::rc::Rc;

use crate::{
    model::{ViewportMode, WindowId},
    window_manager::WindowManager,
};

/// Keys the desktop keyboard layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Escape,
    Tab { shift: bool },
    Enter,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl NavKey {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str, shift: bool) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Escape),
            "Tab" => Some(Self::Tab { shift }),
            "Enter" => Some(Self::Enter),
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => None,
        }
    }

    fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }
}

/// Where document focus sits relative to one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusWithin {
    /// Focus is outside the window.
    Outside,
    /// Focus is inside; `index` is its position among the window's focusables, if it is one.
    Inside { index: Option<usize> },
}

/// Focus queries and moves used by the keyboard layer.
pub trait KeyboardFocus {
    /// Number of focusable controls inside `window`.
    fn focusable_count(&self, window: &WindowId) -> usize;
    fn focus_within(&self, window: &WindowId) -> FocusWithin;
    /// Focuses the `index`-th focusable control inside `window`.
    fn focus_in_window(&self, window: &WindowId, index: usize);
    fn icon_count(&self) -> usize;
    /// Position and target window of the focused desktop icon.
    fn focused_icon(&self) -> Option<(usize, WindowId)>;
    fn focus_icon_at(&self, index: usize);
}

/// Index to focus for a Tab press inside a window with `count` focusables.
///
/// `None` leaves the key to the browser.
pub fn trap_focus(focus: FocusWithin, count: usize, shift: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match focus {
        FocusWithin::Outside => Some(0),
        FocusWithin::Inside { index: Some(0) } if shift => Some(last),
        FocusWithin::Inside { index: Some(idx) } if !shift && idx == last => Some(0),
        FocusWithin::Inside { .. } => None,
    }
}

/// Next icon index for an arrow key.
///
/// Mobile docks run horizontally and accept all four arrows; the desktop column only moves on
/// Up/Down. Both wrap around.
pub fn navigate_icons(
    current: usize,
    count: usize,
    key: NavKey,
    mode: ViewportMode,
) -> Option<usize> {
    if count == 0 || current >= count {
        return None;
    }
    let forward = match (mode, key) {
        (ViewportMode::Mobile, NavKey::ArrowRight | NavKey::ArrowDown) => true,
        (ViewportMode::Mobile, NavKey::ArrowLeft | NavKey::ArrowUp) => false,
        (ViewportMode::Desktop, NavKey::ArrowDown) => true,
        (ViewportMode::Desktop, NavKey::ArrowUp) => false,
        _ => return None,
    };
    Some(if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    })
}

/// Document-level key handler bound to a window manager.
#[derive(Clone)]
pub struct KeyboardNavigator {
    wm: WindowManager,
    focus: Rc<dyn KeyboardFocus>,
}

impl KeyboardNavigator {
    pub fn new(wm: WindowManager, focus: Rc<dyn KeyboardFocus>) -> Self {
        Self { wm, focus }
    }

    /// Handles `key`; `true` means the caller should prevent the browser default.
    pub fn handle_key(&self, key: NavKey) -> bool {
        match key {
            NavKey::Escape => self.close_active(),
            NavKey::Tab { shift } => self.trap_tab(shift),
            NavKey::Enter => self.open_focused_icon(),
            arrow if arrow.is_arrow() => self.move_icon_focus(arrow),
            _ => false,
        }
    }

    fn active_open_window(&self) -> Option<WindowId> {
        self.wm
            .active_window()
            .filter(|id| self.wm.windows().is_open(id.as_str()))
    }

    fn close_active(&self) -> bool {
        let Some(active) = self.active_open_window() else {
            return false;
        };
        self.wm.close(active.as_str());
        true
    }

    fn trap_tab(&self, shift: bool) -> bool {
        let Some(active) = self.active_open_window() else {
            return false;
        };
        let count = self.focus.focusable_count(&active);
        match trap_focus(self.focus.focus_within(&active), count, shift) {
            Some(index) => {
                self.focus.focus_in_window(&active, index);
                true
            }
            None => false,
        }
    }

    fn open_focused_icon(&self) -> bool {
        let Some((_, window)) = self.focus.focused_icon() else {
            return false;
        };
        self.wm.open(window.as_str());
        true
    }

    fn move_icon_focus(&self, key: NavKey) -> bool {
        let Some((current, _)) = self.focus.focused_icon() else {
            return false;
        };
        match navigate_icons(current, self.focus.icon_count(), key, self.wm.mode()) {
            Some(next) => {
                self.focus.focus_icon_at(next);
                true
            }
            None => false,
        }
    }
}
