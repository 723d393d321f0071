//! Start menu open/close state and its keyboard handling.

use std::{cell::Cell, rc::Rc};

use crate::window_manager::WindowManager;

/// Presentation of the start menu and its taskbar button.
pub trait StartMenuSurface {
    /// Shows or hides the menu and updates the button's expanded state.
    fn set_expanded(&self, expanded: bool);
    fn item_count(&self) -> usize;
    /// Index of the focused menu item, if focus is on one.
    fn focused_item(&self) -> Option<usize>;
    fn focus_item(&self, index: usize);
    fn focus_button(&self);
    /// Shows the "safe to turn off your computer" alert over the desktop.
    fn show_shutdown(&self);
    fn dismiss_shutdown(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMenuState {
    #[default]
    Closed,
    Open,
}

/// Item to focus after an Up/Down press, wrapping at both ends.
///
/// With focus off the items, Down lands on the first item and Up on the last.
pub fn next_menu_index(current: Option<usize>, count: usize, down: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let current = current.filter(|idx| *idx < count);
    Some(match (current, down) {
        (Some(idx), true) if idx + 1 < count => idx + 1,
        (_, true) => 0,
        (Some(idx), false) if idx > 0 => idx - 1,
        (_, false) => count - 1,
    })
}

#[derive(Clone)]
pub struct StartMenu {
    wm: WindowManager,
    surface: Rc<dyn StartMenuSurface>,
    state: Rc<Cell<StartMenuState>>,
    shut_down: Rc<Cell<bool>>,
}

impl StartMenu {
    pub fn new(wm: WindowManager, surface: Rc<dyn StartMenuSurface>) -> Self {
        Self {
            wm,
            surface,
            state: Rc::new(Cell::new(StartMenuState::Closed)),
            shut_down: Rc::new(Cell::new(false)),
        }
    }

    pub fn state(&self) -> StartMenuState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state.get() == StartMenuState::Open
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Expands the menu and focuses its first item on the next frame.
    pub fn open(&self) {
        self.state.set(StartMenuState::Open);
        self.surface.set_expanded(true);

        let state = Rc::clone(&self.state);
        let surface = Rc::clone(&self.surface);
        self.wm.schedule_frame(Box::new(move || {
            if state.get() == StartMenuState::Open && surface.item_count() > 0 {
                surface.focus_item(0);
            }
        }));
    }

    pub fn close(&self) {
        self.state.set(StartMenuState::Closed);
        self.surface.set_expanded(false);
    }

    /// A click landed outside both the menu and its button.
    pub fn handle_outside_click(&self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.close();
        true
    }

    /// Escape closes an open menu and returns focus to the start button.
    pub fn handle_escape(&self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.close();
        self.surface.focus_button();
        true
    }

    /// Activates a menu item; items carrying a window id open that window.
    pub fn activate_item(&self, window: Option<&str>) {
        if let Some(window) = window {
            self.wm.open(window);
        }
        self.close();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.get()
    }

    /// Closes the menu and raises the shutdown alert; a second shutdown keeps the one alert.
    pub fn shutdown(&self) {
        self.close();
        if !self.shut_down.replace(true) {
            self.surface.show_shutdown();
        }
    }

    /// Removes the shutdown alert. Returns whether one was showing.
    pub fn dismiss_shutdown(&self) -> bool {
        if !self.shut_down.replace(false) {
            return false;
        }
        self.surface.dismiss_shutdown();
        true
    }

    /// Handles Up/Down inside the menu. Returns whether the key was consumed.
    pub fn handle_arrow(&self, down: bool) -> bool {
        let count = self.surface.item_count();
        if let Some(next) = next_menu_index(self.surface.focused_item(), count, down) {
            self.surface.focus_item(next);
        }
        true
    }
}
