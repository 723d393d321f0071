//! Recording doubles for the surface and host seams.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    model::{ElementSize, Position, Viewport, WindowId},
    surface::{DesktopHost, WindowSurface},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SurfaceCall {
    Show,
    Hide,
    ZIndex(u32),
    Position(Position),
    Active(bool),
    FocusFirst,
    DragHint(bool),
}

pub(crate) struct RecordingSurface {
    size: Cell<ElementSize>,
    has_focusable: Cell<bool>,
    visible: Cell<bool>,
    active: Cell<bool>,
    z_index: Cell<Option<u32>>,
    position: Cell<Option<Position>>,
    focus_count: Cell<usize>,
    calls: RefCell<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub(crate) fn new(size: ElementSize) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(size),
            has_focusable: Cell::new(true),
            visible: Cell::new(false),
            active: Cell::new(false),
            z_index: Cell::new(None),
            position: Cell::new(None),
            focus_count: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn sized(width: i32, height: i32) -> Rc<Self> {
        Self::new(ElementSize::new(width, height))
    }

    pub(crate) fn set_has_focusable(&self, value: bool) {
        self.has_focusable.set(value);
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    pub(crate) fn z_index(&self) -> Option<u32> {
        self.z_index.get()
    }

    pub(crate) fn position(&self) -> Option<Position> {
        self.position.get()
    }

    pub(crate) fn focus_count(&self) -> usize {
        self.focus_count.get()
    }

    pub(crate) fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl WindowSurface for RecordingSurface {
    fn show(&self) {
        self.visible.set(true);
        self.record(SurfaceCall::Show);
    }

    fn hide(&self) {
        self.visible.set(false);
        self.record(SurfaceCall::Hide);
    }

    fn set_z_index(&self, z_index: u32) {
        self.z_index.set(Some(z_index));
        self.record(SurfaceCall::ZIndex(z_index));
    }

    fn set_position(&self, position: Position) {
        self.position.set(Some(position));
        self.record(SurfaceCall::Position(position));
    }

    fn set_active(&self, active: bool) {
        self.active.set(active);
        self.record(SurfaceCall::Active(active));
    }

    fn size(&self) -> ElementSize {
        self.size.get()
    }

    fn focus_first(&self) -> bool {
        self.record(SurfaceCall::FocusFirst);
        if self.has_focusable.get() {
            self.focus_count.set(self.focus_count.get() + 1);
            true
        } else {
            false
        }
    }

    fn set_drag_hint(&self, dragging: bool) {
        self.record(SurfaceCall::DragHint(dragging));
    }
}

pub(crate) struct FakeHost {
    viewport: Cell<Viewport>,
    random: Cell<f64>,
    icons: RefCell<Vec<WindowId>>,
    focused_icons: RefCell<Vec<WindowId>>,
    selected_icon: RefCell<Option<WindowId>>,
    frames: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl FakeHost {
    pub(crate) fn new(viewport: Viewport) -> Rc<Self> {
        Rc::new(Self {
            viewport: Cell::new(viewport),
            random: Cell::new(0.5),
            icons: RefCell::new(Vec::new()),
            focused_icons: RefCell::new(Vec::new()),
            selected_icon: RefCell::new(None),
            frames: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn desktop() -> Rc<Self> {
        Self::new(Viewport::new(1280, 800))
    }

    pub(crate) fn mobile() -> Rc<Self> {
        Self::new(Viewport::new(390, 844))
    }

    pub(crate) fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    pub(crate) fn set_random(&self, value: f64) {
        self.random.set(value);
    }

    pub(crate) fn add_icon(&self, id: &str) {
        self.icons.borrow_mut().push(WindowId::new(id));
    }

    pub(crate) fn focused_icons(&self) -> Vec<WindowId> {
        self.focused_icons.borrow().clone()
    }

    pub(crate) fn selected_icon(&self) -> Option<WindowId> {
        self.selected_icon.borrow().clone()
    }

    pub(crate) fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Runs every queued frame task; tasks queued while running wait for the next call.
    pub(crate) fn run_frames(&self) -> usize {
        let tasks = std::mem::take(&mut *self.frames.borrow_mut());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl DesktopHost for FakeHost {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn focus_icon(&self, id: &WindowId) -> bool {
        if !self.icons.borrow().contains(id) {
            return false;
        }
        self.focused_icons.borrow_mut().push(id.clone());
        true
    }

    fn select_icon(&self, id: &WindowId) {
        *self.selected_icon.borrow_mut() = Some(id.clone());
    }

    fn schedule_frame(&self, task: Box<dyn FnOnce()>) {
        self.frames.borrow_mut().push(task);
    }

    fn random_fraction(&self) -> f64 {
        self.random.get()
    }
}
