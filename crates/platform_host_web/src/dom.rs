//! Markup conventions and small DOM helpers shared by the adapters.

use desktop_wm::{WindowId, WindowManagerConfig};
use leptos::logging;
use wasm_bindgen::JsCast;

/// Window container class; ids follow `window-<id>`.
pub const WINDOW_SELECTOR: &str = ".window";
pub const WINDOW_ID_PREFIX: &str = "window-";
pub const TITLE_BAR_SELECTOR: &str = "[data-draggable]";
pub const TITLE_BAR_CONTROLS_SELECTOR: &str = ".title-bar-controls";
pub const CLOSE_BUTTON_SELECTOR: &str = "[data-close-window]";
pub const DESKTOP_ICON_SELECTOR: &str = ".desktop-icon[data-window]";
pub const START_MENU_ID: &str = "start-menu";
pub const START_BUTTON_ID: &str = "start-button";
pub const START_MENU_ITEM_SELECTOR: &str = ".start-menu-item";
pub const OPEN_WINDOW_SELECTOR: &str = "[data-open-window]";
pub const SHUTDOWN_BUTTON_SELECTOR: &str = "#shutdown-btn";
pub const SHUTDOWN_OVERLAY_CLASS: &str = "shutdown-overlay";
pub const CONFIG_SCRIPT_ID: &str = "desktop-wm-config";

pub const ACTIVE_WINDOW_CLASS: &str = "window--active";
pub const SELECTED_ICON_CLASS: &str = "desktop-icon--selected";
pub const START_BUTTON_ACTIVE_CLASS: &str = "taskbar-start--active";

pub const SHUTDOWN_MARKUP: &str = concat!(
    r#"<div class="shutdown-box">"#,
    r#"<p class="shutdown-title">It is now safe to turn off<br>your computer.</p>"#,
    r#"<p class="shutdown-subtext">Or just close this tab. Either way, thanks for visiting.</p>"#,
    "</div>"
);

/// Controls that receive focus when a window opens.
pub const OPEN_FOCUS_SELECTOR: &str = r#"button, [href], input, [tabindex]:not([tabindex="-1"])"#;
/// Controls the Tab trap cycles through.
pub const TRAP_FOCUS_SELECTOR: &str = concat!(
    "button:not([disabled]), [href], input:not([disabled]), select:not([disabled]), ",
    r#"textarea:not([disabled]), [tabindex]:not([tabindex="-1"])"#
);

/// Window id encoded in a `window-<id>` element id.
pub fn window_id_from_element_id(element_id: &str) -> Option<&str> {
    element_id
        .strip_prefix(WINDOW_ID_PREFIX)
        .filter(|id| !id.is_empty())
}

/// Parses a `data-default-x`/`data-default-y` attribute. Fractions are truncated.
pub fn parse_default_coordinate(raw: Option<&str>) -> Option<i32> {
    let raw = raw?.trim();
    raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i32)
    })
}

pub fn px(value: i32) -> String {
    format!("{value}px")
}

/// Selector for the desktop icon launching `id`.
pub fn icon_selector(id: &WindowId) -> String {
    let escaped = id.as_str().replace('\\', "\\\\").replace('"', "\\\"");
    format!(r#"[data-window="{escaped}"]"#)
}

/// Media query matching widths below `breakpoint_px`.
pub fn mobile_media_query(breakpoint_px: i32) -> String {
    format!("(max-width: {}px)", breakpoint_px.saturating_sub(1))
}

/// CSS pixels as a whole-pixel viewport dimension.
///
/// Rounds up so a fractional width such as 767.5 stays above `(max-width: 767px)`, matching the
/// media query.
pub fn viewport_dimension(css_px: f64) -> Option<i32> {
    css_px.is_finite().then(|| css_px.ceil() as i32)
}

pub(crate) fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

pub(crate) fn active_element() -> Option<web_sys::Element> {
    document().and_then(|document| document.active_element())
}

pub(crate) fn html_elements(
    nodes: Result<web_sys::NodeList, wasm_bindgen::JsValue>,
) -> Vec<web_sys::HtmlElement> {
    let Ok(nodes) = nodes else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

/// Index of `element` among `candidates`.
pub(crate) fn position_of(
    candidates: &[web_sys::HtmlElement],
    element: Option<&web_sys::Element>,
) -> Option<usize> {
    let element = element?;
    candidates.iter().position(|candidate| {
        let candidate: &web_sys::Element = candidate.as_ref();
        candidate == element
    })
}

/// Nearest ancestor (or self) of an event target matching `selector`.
pub(crate) fn closest(
    target: Option<&web_sys::EventTarget>,
    selector: &str,
) -> Option<web_sys::Element> {
    target?
        .dyn_ref::<web_sys::Element>()?
        .closest(selector)
        .ok()
        .flatten()
}

pub(crate) fn focus(element: &web_sys::HtmlElement) -> bool {
    element.focus().is_ok()
}

/// Reads the JSON tuning override embedded in the page, falling back to the built-in catalog.
pub fn page_config() -> WindowManagerConfig {
    let Some(raw) = document()
        .and_then(|document| document.get_element_by_id(CONFIG_SCRIPT_ID))
        .and_then(|script| script.text_content())
    else {
        return WindowManagerConfig::default();
    };
    if raw.trim().is_empty() {
        return WindowManagerConfig::default();
    }
    match WindowManagerConfig::from_json_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("ignoring `#{CONFIG_SCRIPT_ID}`: {err}");
            WindowManagerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn window_ids_come_from_prefixed_element_ids() {
        assert_eq!(window_id_from_element_id("window-about"), Some("about"));
        assert_eq!(window_id_from_element_id("window-"), None);
        assert_eq!(window_id_from_element_id("about"), None);
    }

    #[test]
    fn default_coordinates_accept_integers_and_decimals() {
        assert_eq!(parse_default_coordinate(Some(" 240 ")), Some(240));
        assert_eq!(parse_default_coordinate(Some("0")), Some(0));
        assert_eq!(parse_default_coordinate(Some("12.9")), Some(12));
        assert_eq!(parse_default_coordinate(Some("left")), None);
        assert_eq!(parse_default_coordinate(Some("NaN")), None);
        assert_eq!(parse_default_coordinate(None), None);
    }

    #[test]
    fn icon_selector_quotes_the_window_id() {
        assert_eq!(
            icon_selector(&WindowId::new("notes")),
            r#"[data-window="notes"]"#
        );
        assert_eq!(
            icon_selector(&WindowId::new(r#"a"b"#)),
            r#"[data-window="a\"b"]"#
        );
    }

    #[test]
    fn media_query_sits_one_pixel_below_the_breakpoint() {
        assert_eq!(mobile_media_query(768), "(max-width: 767px)");
        assert_eq!(px(-12), "-12px");
    }

    #[test]
    fn fractional_widths_agree_with_the_media_query() {
        let breakpoint = 768;
        // `(max-width: 767px)` matches 767 but not 767.5.
        assert_eq!(viewport_dimension(767.0), Some(767));
        assert!(viewport_dimension(767.0).is_some_and(|w| w < breakpoint));
        assert_eq!(viewport_dimension(767.5), Some(768));
        assert!(viewport_dimension(767.5).is_some_and(|w| w >= breakpoint));
        assert_eq!(viewport_dimension(f64::NAN), None);
    }
}
