//! `.window` elements as window-manager surfaces.

use desktop_wm::{ElementSize, Position, WindowSurface};
use wasm_bindgen::JsCast;

use crate::dom::{px, ACTIVE_WINDOW_CLASS, OPEN_FOCUS_SELECTOR};

/// One `.window` element. Visibility is carried by `aria-hidden`; the stylesheet hides windows
/// whose value is `"true"`.
#[derive(Debug, Clone)]
pub struct DomWindowSurface {
    element: web_sys::HtmlElement,
}

impl DomWindowSurface {
    pub fn new(element: web_sys::HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &web_sys::HtmlElement {
        &self.element
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.element.style().set_property(property, value);
    }
}

impl WindowSurface for DomWindowSurface {
    fn show(&self) {
        let _ = self.element.set_attribute("aria-hidden", "false");
    }

    fn hide(&self) {
        let _ = self.element.set_attribute("aria-hidden", "true");
    }

    fn set_z_index(&self, z_index: u32) {
        self.set_style("z-index", &z_index.to_string());
    }

    fn set_position(&self, position: Position) {
        self.set_style("left", &px(position.x));
        self.set_style("top", &px(position.y));
    }

    fn set_active(&self, active: bool) {
        let _ = self
            .element
            .class_list()
            .toggle_with_force(ACTIVE_WINDOW_CLASS, active);
    }

    fn size(&self) -> ElementSize {
        let rect = self.element.get_bounding_client_rect();
        ElementSize::new(rect.width().round() as i32, rect.height().round() as i32)
    }

    fn focus_first(&self) -> bool {
        let Ok(Some(first)) = self.element.query_selector(OPEN_FOCUS_SELECTOR) else {
            return false;
        };
        first
            .dyn_into::<web_sys::HtmlElement>()
            .is_ok_and(|first| first.focus().is_ok())
    }

    fn set_drag_hint(&self, dragging: bool) {
        self.set_style("will-change", if dragging { "left, top" } else { "auto" });
    }
}
