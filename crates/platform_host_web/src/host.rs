//! Browser implementation of the window manager's environment services.

use desktop_wm::{DesktopHost, Viewport, WindowId};
use leptos::logging;
use wasm_bindgen::{closure::Closure, JsCast};

use crate::dom::{
    self, icon_selector, viewport_dimension, DESKTOP_ICON_SELECTOR, SELECTED_ICON_CLASS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDesktopHost;

impl DesktopHost for BrowserDesktopHost {
    fn viewport(&self) -> Viewport {
        let fallback = Viewport::default();
        let Some(window) = web_sys::window() else {
            return fallback;
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .and_then(viewport_dimension)
            .unwrap_or(fallback.width);
        let height = window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .and_then(viewport_dimension)
            .unwrap_or(fallback.height);
        Viewport::new(width, height)
    }

    fn focus_icon(&self, id: &WindowId) -> bool {
        let Some(document) = dom::document() else {
            return false;
        };
        let Ok(Some(icon)) = document.query_selector(&icon_selector(id)) else {
            return false;
        };
        icon.dyn_into::<web_sys::HtmlElement>()
            .is_ok_and(|icon| dom::focus(&icon))
    }

    fn select_icon(&self, id: &WindowId) {
        let Some(document) = dom::document() else {
            return;
        };
        for icon in dom::html_elements(document.query_selector_all(DESKTOP_ICON_SELECTOR)) {
            let selected = icon.get_attribute("data-window").as_deref() == Some(id.as_str());
            let _ = icon
                .class_list()
                .toggle_with_force(SELECTED_ICON_CLASS, selected);
        }
    }

    fn schedule_frame(&self, task: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            task();
            return;
        };
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
            logging::warn!("requestAnimationFrame failed: {err:?}");
        }
    }

    fn random_fraction(&self) -> f64 {
        js_sys::Math::random()
    }
}
