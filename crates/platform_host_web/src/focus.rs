//! DOM focus adapters for the keyboard layer and the start menu.

use std::cell::RefCell;

use desktop_wm::{FocusWithin, KeyboardFocus, StartMenuSurface, WindowId};
use leptos::logging;
use wasm_bindgen::JsCast;

use crate::dom::{
    self, DESKTOP_ICON_SELECTOR, SHUTDOWN_MARKUP, SHUTDOWN_OVERLAY_CLASS,
    START_BUTTON_ACTIVE_CLASS, START_BUTTON_ID, START_MENU_ID, START_MENU_ITEM_SELECTOR,
    TRAP_FOCUS_SELECTOR, WINDOW_ID_PREFIX,
};

/// Focus queries against the live document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomKeyboardFocus;

impl DomKeyboardFocus {
    fn window_element(window: &WindowId) -> Option<web_sys::Element> {
        dom::document()?.get_element_by_id(&format!("{WINDOW_ID_PREFIX}{window}"))
    }

    fn focusables(window: &WindowId) -> Vec<web_sys::HtmlElement> {
        match Self::window_element(window) {
            Some(element) => dom::html_elements(element.query_selector_all(TRAP_FOCUS_SELECTOR)),
            None => Vec::new(),
        }
    }

    fn icons() -> Vec<web_sys::HtmlElement> {
        match dom::document() {
            Some(document) => {
                dom::html_elements(document.query_selector_all(DESKTOP_ICON_SELECTOR))
            }
            None => Vec::new(),
        }
    }
}

impl KeyboardFocus for DomKeyboardFocus {
    fn focusable_count(&self, window: &WindowId) -> usize {
        Self::focusables(window).len()
    }

    fn focus_within(&self, window: &WindowId) -> FocusWithin {
        let Some(container) = Self::window_element(window) else {
            return FocusWithin::Outside;
        };
        let active = dom::active_element();
        let Some(active_node) = active.as_ref().map(AsRef::<web_sys::Node>::as_ref) else {
            return FocusWithin::Outside;
        };
        if !container.contains(Some(active_node)) {
            return FocusWithin::Outside;
        }
        FocusWithin::Inside {
            index: dom::position_of(&Self::focusables(window), active.as_ref()),
        }
    }

    fn focus_in_window(&self, window: &WindowId, index: usize) {
        if let Some(target) = Self::focusables(window).get(index) {
            dom::focus(target);
        }
    }

    fn icon_count(&self) -> usize {
        Self::icons().len()
    }

    fn focused_icon(&self) -> Option<(usize, WindowId)> {
        let icons = Self::icons();
        let index = dom::position_of(&icons, dom::active_element().as_ref())?;
        let window = icons[index].get_attribute("data-window")?;
        Some((index, WindowId::new(window)))
    }

    fn focus_icon_at(&self, index: usize) {
        if let Some(icon) = Self::icons().get(index) {
            dom::focus(icon);
        }
    }
}

/// `#start-menu` and `#start-button`, plus the shutdown overlay while it is up.
#[derive(Debug, Clone)]
pub struct DomStartMenuSurface {
    menu: web_sys::HtmlElement,
    button: web_sys::HtmlElement,
    shutdown_overlay: RefCell<Option<web_sys::Element>>,
}

impl DomStartMenuSurface {
    pub fn new(menu: web_sys::HtmlElement, button: web_sys::HtmlElement) -> Self {
        Self {
            menu,
            button,
            shutdown_overlay: RefCell::new(None),
        }
    }

    /// Finds both elements in `document`; `None` when the page has no start menu.
    pub fn from_document(document: &web_sys::Document) -> Option<Self> {
        let menu = document
            .get_element_by_id(START_MENU_ID)?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        let button = document
            .get_element_by_id(START_BUTTON_ID)?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        Some(Self::new(menu, button))
    }

    pub fn menu_contains(&self, target: Option<&web_sys::EventTarget>) -> bool {
        Self::contains(&self.menu, target)
    }

    pub fn button_contains(&self, target: Option<&web_sys::EventTarget>) -> bool {
        Self::contains(&self.button, target)
    }

    pub fn shutdown_overlay_contains(&self, target: Option<&web_sys::EventTarget>) -> bool {
        let node = target.and_then(|target| target.dyn_ref::<web_sys::Node>());
        self.shutdown_overlay
            .borrow()
            .as_ref()
            .is_some_and(|overlay| node.is_some() && overlay.contains(node))
    }

    fn build_shutdown_overlay() -> Result<web_sys::Element, String> {
        let document = dom::document().ok_or_else(|| "document unavailable".to_string())?;
        let body = document.body().ok_or_else(|| "document has no body".to_string())?;
        let overlay = document
            .create_element("div")
            .map_err(|err| format!("create overlay: {err:?}"))?;
        overlay.set_class_name(SHUTDOWN_OVERLAY_CLASS);
        overlay
            .set_attribute("role", "alert")
            .map_err(|err| format!("overlay role: {err:?}"))?;
        overlay.set_inner_html(SHUTDOWN_MARKUP);
        body.append_child(&overlay)
            .map_err(|err| format!("append overlay: {err:?}"))?;
        Ok(overlay)
    }

    fn contains(element: &web_sys::HtmlElement, target: Option<&web_sys::EventTarget>) -> bool {
        let node = target.and_then(|target| target.dyn_ref::<web_sys::Node>());
        node.is_some() && element.contains(node)
    }

    fn items(&self) -> Vec<web_sys::HtmlElement> {
        dom::html_elements(self.menu.query_selector_all(START_MENU_ITEM_SELECTOR))
    }
}

impl StartMenuSurface for DomStartMenuSurface {
    fn set_expanded(&self, expanded: bool) {
        let _ = self
            .menu
            .set_attribute("aria-hidden", if expanded { "false" } else { "true" });
        let _ = self
            .button
            .set_attribute("aria-expanded", if expanded { "true" } else { "false" });
        let _ = self
            .button
            .class_list()
            .toggle_with_force(START_BUTTON_ACTIVE_CLASS, expanded);
    }

    fn item_count(&self) -> usize {
        self.items().len()
    }

    fn focused_item(&self) -> Option<usize> {
        dom::position_of(&self.items(), dom::active_element().as_ref())
    }

    fn focus_item(&self, index: usize) {
        if let Some(item) = self.items().get(index) {
            dom::focus(item);
        }
    }

    fn focus_button(&self) {
        dom::focus(&self.button);
    }

    fn show_shutdown(&self) {
        match Self::build_shutdown_overlay() {
            Ok(overlay) => {
                if let Some(stale) = self.shutdown_overlay.replace(Some(overlay)) {
                    stale.remove();
                }
            }
            Err(err) => logging::warn!("shutdown overlay unavailable: {err}"),
        }
    }

    fn dismiss_shutdown(&self) {
        if let Some(overlay) = self.shutdown_overlay.take() {
            overlay.remove();
        }
    }
}
