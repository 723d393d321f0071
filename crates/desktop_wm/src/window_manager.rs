//! Window manager façade: the single writer of window state.
//!
//! [`WindowManager`] is a cheap cloneable handle. Icon handlers, the keyboard layer, the start
//! menu, and terminal commands each hold a clone and drive state only through its methods. No
//! method returns an error; stale ids and rejected steps are logged and ignored.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use leptos::logging;

use crate::{
    clamp::ClampBounds,
    config::WindowManagerConfig,
    drag::{DragSession, DragTracker},
    model::{
        IconActivation, InputModality, PointerPosition, Position, PressRegion, Viewport,
        ViewportMode, WindowDescriptor, WindowId,
    },
    registry::{default_position, WindowRegistry},
    stacking::StackingController,
    surface::{DesktopHost, WindowSurface},
    viewport::{IconClickTracker, ModeTransition, ViewportModeController},
};

struct WindowManagerState {
    config: WindowManagerConfig,
    bounds: ClampBounds,
    registry: WindowRegistry,
    stacking: StackingController,
    drags: DragTracker,
    viewport: ViewportModeController,
    icon_clicks: IconClickTracker,
}

/// Shared handle to the window manager.
#[derive(Clone)]
pub struct WindowManager {
    state: Rc<RefCell<WindowManagerState>>,
    host: Rc<dyn DesktopHost>,
}

impl WindowManager {
    /// Creates an empty manager; the initial mode comes from the host's current viewport.
    pub fn new(config: WindowManagerConfig, host: Rc<dyn DesktopHost>) -> Self {
        let viewport = ViewportModeController::new(config.mobile_breakpoint_px, host.viewport().width);
        let state = WindowManagerState {
            bounds: ClampBounds::from(&config),
            registry: WindowRegistry::default(),
            stacking: StackingController::new(config.z_index_baseline),
            drags: DragTracker::default(),
            icon_clicks: IconClickTracker::new(config.double_click_ms),
            viewport,
            config,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            host,
        }
    }

    pub fn config(&self) -> WindowManagerConfig {
        self.state.borrow().config.clone()
    }

    /// Registers a closed window. Re-registering an existing id changes nothing.
    ///
    /// Missing default coordinates are drawn from the configured offset range.
    pub fn register(
        &self,
        id: impl Into<WindowId>,
        surface: Rc<dyn WindowSurface>,
        default_x: Option<i32>,
        default_y: Option<i32>,
    ) -> bool {
        let id = id.into();
        let mut state = self.state.borrow_mut();
        if state.registry.contains(id.as_str()) {
            logging::debug_warn!("register ignored: window `{id}` already registered");
            return false;
        }
        let position = default_position(default_x, default_y, &state.config, || {
            self.host.random_fraction()
        });
        let baseline = state.config.z_index_baseline;
        state.registry.register(id, surface, position, baseline)
    }

    /// Opens `id`, raises it, and moves focus into it on the next frame.
    ///
    /// In mobile mode every other open window is closed first.
    pub fn open(&self, id: &str) {
        let others = {
            let state = self.state.borrow();
            if !state.registry.contains(id) {
                logging::debug_warn!("open ignored: unknown window `{id}`");
                return;
            }
            if state.viewport.is_mobile() {
                state
                    .registry
                    .open_ids()
                    .into_iter()
                    .filter(|other| other != id)
                    .collect::<Vec<_>>()
            } else {
                Vec::new()
            }
        };
        for other in others {
            self.close(other.as_str());
        }

        {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let is_mobile = state.viewport.is_mobile();
            let bounds = state.bounds;
            let Some(entry) = state.registry.entry_mut(id) else {
                return;
            };

            entry.descriptor.is_open = true;
            entry.surface.show();
            if !is_mobile {
                let position = bounds.clamp(
                    entry.descriptor.position,
                    entry.surface.size(),
                    self.host.viewport(),
                );
                entry.descriptor.position = position;
                entry.surface.set_position(position);
            }

            if let Err(err) = state.stacking.bring_to_front(&mut state.registry, id) {
                logging::debug_warn!("open could not raise window: {err}");
            }
        }

        self.schedule_focus(id);
    }

    /// Closes `id` and hands focus back to its desktop icon.
    pub fn close(&self, id: &str) {
        let closed = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let Some(entry) = state.registry.entry_mut(id) else {
                logging::debug_warn!("close ignored: unknown window `{id}`");
                return;
            };
            if !entry.descriptor.is_open {
                return;
            }

            entry.descriptor.is_open = false;
            entry.surface.hide();
            entry.surface.set_active(false);
            if state.drags.cancel_window(id).is_some() {
                entry.surface.set_drag_hint(false);
            }
            let closed = entry.descriptor.id.clone();
            state.stacking.clear_if_active(id);
            closed
        };

        self.host.focus_icon(&closed);
    }

    /// Raises `id` above every other window and marks it active.
    pub fn bring_to_front(&self, id: &str) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if let Err(err) = state.stacking.bring_to_front(&mut state.registry, id) {
            logging::debug_warn!("bring_to_front ignored: {err}");
        }
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.state.borrow().stacking.active().cloned()
    }

    /// Live view over every registered window.
    pub fn windows(&self) -> WindowsView {
        WindowsView {
            state: Rc::clone(&self.state),
        }
    }

    pub fn mode(&self) -> ViewportMode {
        self.state.borrow().viewport.mode()
    }

    pub fn is_mobile(&self) -> bool {
        self.state.borrow().viewport.is_mobile()
    }

    /// Window being dragged by any modality.
    pub fn dragging_window(&self) -> Option<WindowId> {
        self.state.borrow().drags.dragging_window().cloned()
    }

    /// Handles a press inside window `id`.
    ///
    /// Any press raises the window. A desktop title-bar press also arms a drag for `modality`;
    /// returns whether it did. Presses while a drag is in progress are ignored entirely.
    pub fn press(
        &self,
        modality: InputModality,
        id: &str,
        region: PressRegion,
        pointer: PointerPosition,
    ) -> bool {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if !state.drags.is_idle() {
            logging::debug_warn!("press on `{id}` ignored while a drag is in progress");
            return false;
        }
        if let Err(err) = state.stacking.bring_to_front(&mut state.registry, id) {
            logging::debug_warn!("press ignored: {err}");
            return false;
        }
        if region != PressRegion::TitleBar || state.viewport.is_mobile() {
            return false;
        }

        let Some(entry) = state.registry.entry(id) else {
            return false;
        };
        let session = DragSession {
            window_id: entry.descriptor.id.clone(),
            pointer_origin: pointer,
            position_origin: entry.descriptor.position,
            element: entry.surface.size(),
            viewport: self.host.viewport(),
        };
        let surface = Rc::clone(&entry.surface);
        match state.drags.begin(modality, session) {
            Ok(()) => {
                surface.set_drag_hint(true);
                true
            }
            Err(err) => {
                logging::debug_warn!("{err}");
                false
            }
        }
    }

    /// Moves the window dragged by `modality`; returns the applied position.
    pub fn drag_move(&self, modality: InputModality, pointer: PointerPosition) -> Option<Position> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let session = state.drags.session(modality)?;
        let position = session.position_for(pointer, &state.bounds);
        let window_id = session.window_id.clone();

        let entry = state.registry.entry_mut(window_id.as_str())?;
        entry.descriptor.position = position;
        entry.surface.set_position(position);
        Some(position)
    }

    /// Ends the drag for `modality`, wherever the release happened. Returns whether one ended.
    pub fn release(&self, modality: InputModality) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(session) = state.drags.end(modality) else {
            return false;
        };
        if let Some(surface) = state.registry.surface(session.window_id.as_str()) {
            surface.set_drag_hint(false);
        }
        true
    }

    /// Click on the desktop icon that launches `id`, at `now_ms`.
    pub fn activate_icon(&self, id: &str, now_ms: u64) -> IconActivation {
        let icon = WindowId::new(id);
        let activation = {
            let mut state = self.state.borrow_mut();
            let mode = state.viewport.mode();
            state.icon_clicks.click(&icon, now_ms, mode)
        };
        match activation {
            IconActivation::Select => self.host.select_icon(&icon),
            IconActivation::Open => self.open(id),
        }
        activation
    }

    /// Applies a breakpoint result reported by a media-query listener.
    pub fn set_mobile(&self, is_mobile: bool) {
        let transition = self.state.borrow_mut().viewport.set_mobile(is_mobile);
        self.apply_transition(transition);
    }

    /// Re-reads the host viewport: applies a breakpoint crossing or, on desktop, re-clamps open
    /// windows to the new size.
    pub fn sync_viewport(&self) {
        let viewport = self.host.viewport();
        let transition = self.state.borrow_mut().viewport.observe_width(viewport.width);
        if transition.is_some() {
            self.apply_transition(transition);
        } else if !self.is_mobile() {
            self.reclamp_open_windows(viewport, false);
        }
    }

    fn apply_transition(&self, transition: Option<ModeTransition>) {
        match transition {
            None => {}
            Some(ModeTransition::EnteredMobile) => {
                logging::log!("window manager entered mobile mode");
                let to_close = {
                    let mut guard = self.state.borrow_mut();
                    let state = &mut *guard;
                    for session in state.drags.cancel_all() {
                        if let Some(surface) = state.registry.surface(session.window_id.as_str()) {
                            surface.set_drag_hint(false);
                        }
                    }
                    let active = state.stacking.active().cloned();
                    state
                        .registry
                        .open_ids()
                        .into_iter()
                        .filter(|id| Some(id) != active.as_ref())
                        .collect::<Vec<_>>()
                };
                for id in to_close {
                    self.close(id.as_str());
                }
            }
            Some(ModeTransition::EnteredDesktop) => {
                logging::log!("window manager entered desktop mode");
                self.reclamp_open_windows(self.host.viewport(), true);
            }
        }
    }

    /// Clamps open windows into `viewport`. Surfaces are only touched when the position changed,
    /// unless `reposition_all` is set: windows opened on mobile were never placed.
    fn reclamp_open_windows(&self, viewport: Viewport, reposition_all: bool) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let bounds = state.bounds;
        for entry in state.registry.entries_mut() {
            if !entry.descriptor.is_open {
                continue;
            }
            let clamped = bounds.clamp(entry.descriptor.position, entry.surface.size(), viewport);
            if reposition_all || clamped != entry.descriptor.position {
                entry.descriptor.position = clamped;
                entry.surface.set_position(clamped);
            }
        }
    }

    /// Runs `task` on the host's next frame.
    pub(crate) fn schedule_frame(&self, task: Box<dyn FnOnce()>) {
        self.host.schedule_frame(task);
    }

    fn schedule_focus(&self, id: &str) {
        let state = Rc::downgrade(&self.state);
        let id = WindowId::new(id);
        self.host
            .schedule_frame(Box::new(move || focus_first_control(&state, &id)));
    }
}

// Runs a frame after `open`; the window may have closed (or the manager dropped) since.
fn focus_first_control(state: &Weak<RefCell<WindowManagerState>>, id: &WindowId) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let surface = {
        let Ok(current) = state.try_borrow() else {
            return;
        };
        let Some(entry) = current
            .registry
            .entry(id.as_str())
            .filter(|entry| entry.descriptor.is_open)
        else {
            return;
        };
        Rc::clone(&entry.surface)
    };
    if !surface.focus_first() {
        logging::debug_warn!("window `{id}` has no focusable control");
    }
}

/// Read-only view that always reflects the manager's current state.
#[derive(Clone)]
pub struct WindowsView {
    state: Rc<RefCell<WindowManagerState>>,
}

impl WindowsView {
    pub fn get(&self, id: &str) -> Option<WindowDescriptor> {
        self.state.borrow().registry.get(id).cloned()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.state
            .borrow()
            .registry
            .get(id)
            .is_some_and(|w| w.is_open)
    }

    /// Ids in registration order.
    pub fn ids(&self) -> Vec<WindowId> {
        self.state
            .borrow()
            .registry
            .all()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> Vec<WindowDescriptor> {
        self.state
            .borrow()
            .registry
            .all()
            .map(|(_, w)| w.clone())
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.state.borrow().registry.open_count()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().registry.is_empty()
    }
}
