//! Document-level event wiring.
//!
//! Every listener is delegated from `window`, so windows and icons added to the markup after
//! boot only need registering, not rebinding.

use std::rc::Rc;

use desktop_wm::{
    builtin_catalog, InputModality, KeyboardNavigator, NavKey, PointerPosition, PressRegion,
    StartMenu, WindowId, WindowManager, WindowManagerConfig,
};
use leptos::{ev, leptos_dom::helpers::WindowListenerHandle, logging, window_event_listener};
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    dom::{
        self, mobile_media_query, parse_default_coordinate, window_id_from_element_id,
        CLOSE_BUTTON_SELECTOR, DESKTOP_ICON_SELECTOR, OPEN_WINDOW_SELECTOR,
        SHUTDOWN_BUTTON_SELECTOR, TITLE_BAR_CONTROLS_SELECTOR, TITLE_BAR_SELECTOR, WINDOW_SELECTOR,
    },
    focus::{DomKeyboardFocus, DomStartMenuSurface},
    host::BrowserDesktopHost,
    surface::DomWindowSurface,
};

#[derive(Clone)]
struct MenuBinding {
    menu: StartMenu,
    surface: Rc<DomStartMenuSurface>,
}

struct MediaBinding {
    query: web_sys::MediaQueryList,
    on_change: Closure<dyn FnMut(web_sys::MediaQueryListEvent)>,
}

/// Live desktop wiring. Must outlive the page session (the breakpoint callback is freed on drop);
/// call [`Self::remove`] to detach everything.
pub struct DesktopBindings {
    listeners: Vec<WindowListenerHandle>,
    media: Option<MediaBinding>,
}

impl DesktopBindings {
    /// Registers every `.window` in the document and attaches the desktop listeners.
    ///
    /// # Errors
    ///
    /// Returns an error when no document is available.
    pub fn install(config: WindowManagerConfig) -> Result<Self, String> {
        let document = dom::document().ok_or_else(|| "document unavailable".to_string())?;
        let breakpoint_px = config.mobile_breakpoint_px;
        let wm = WindowManager::new(config, Rc::new(BrowserDesktopHost));

        let registered = register_windows(&wm, &document);
        logging::log!("desktop window manager registered {registered} windows");

        let keyboard = KeyboardNavigator::new(wm.clone(), Rc::new(DomKeyboardFocus));
        let menu = DomStartMenuSurface::from_document(&document).map(|surface| {
            let surface = Rc::new(surface);
            MenuBinding {
                menu: StartMenu::new(wm.clone(), surface.clone()),
                surface,
            }
        });

        let listeners = attach_listeners(&wm, &keyboard, menu.as_ref());
        let media = watch_breakpoint(&wm, breakpoint_px);

        Ok(Self { listeners, media })
    }

    /// Detaches every listener.
    pub fn remove(self) {
        for listener in self.listeners {
            listener.remove();
        }
        if let Some(media) = self.media {
            if let Err(err) = media.query.remove_event_listener_with_callback(
                "change",
                media.on_change.as_ref().unchecked_ref(),
            ) {
                logging::debug_warn!("failed to unwatch `{}`: {err:?}", media.query.media());
            }
        }
    }
}

fn register_windows(wm: &WindowManager, document: &web_sys::Document) -> usize {
    let mut registered = 0;
    for element in dom::html_elements(document.query_selector_all(WINDOW_SELECTOR)) {
        let element_id = element.id();
        let Some(id) = window_id_from_element_id(&element_id) else {
            logging::debug_warn!("skipping `.window` without a `window-<id>` id: `{element_id}`");
            continue;
        };
        let catalog = builtin_catalog().window(id);
        let default_x =
            parse_default_coordinate(element.get_attribute("data-default-x").as_deref())
                .or_else(|| catalog.and_then(|window| window.default_x));
        let default_y =
            parse_default_coordinate(element.get_attribute("data-default-y").as_deref())
                .or_else(|| catalog.and_then(|window| window.default_y));
        let surface = Rc::new(DomWindowSurface::new(element));
        if wm.register(id, surface, default_x, default_y) {
            registered += 1;
        }
    }
    registered
}

fn attach_listeners(
    wm: &WindowManager,
    keyboard: &KeyboardNavigator,
    menu: Option<&MenuBinding>,
) -> Vec<WindowListenerHandle> {
    let mut listeners = Vec::new();

    let (click_wm, click_menu) = (wm.clone(), menu.cloned());
    listeners.push(window_event_listener(ev::click, move |ev| {
        route_click(&click_wm, click_menu.as_ref(), &ev);
    }));

    let press_wm = wm.clone();
    listeners.push(window_event_listener(ev::mousedown, move |ev| {
        let pointer = PointerPosition::new(ev.client_x(), ev.client_y());
        if press(&press_wm, InputModality::Pointer, ev.target().as_ref(), pointer) {
            ev.prevent_default();
        }
    }));

    let move_wm = wm.clone();
    listeners.push(window_event_listener(ev::mousemove, move |ev| {
        let pointer = PointerPosition::new(ev.client_x(), ev.client_y());
        move_wm.drag_move(InputModality::Pointer, pointer);
    }));

    let release_wm = wm.clone();
    listeners.push(window_event_listener(ev::mouseup, move |_| {
        release_wm.release(InputModality::Pointer);
    }));

    let touch_wm = wm.clone();
    listeners.push(window_event_listener(ev::touchstart, move |ev| {
        if let Some(pointer) = first_touch(&ev) {
            press(&touch_wm, InputModality::Touch, ev.target().as_ref(), pointer);
        }
    }));

    let touch_move_wm = wm.clone();
    listeners.push(window_event_listener(ev::touchmove, move |ev| {
        if let Some(pointer) = first_touch(&ev) {
            touch_move_wm.drag_move(InputModality::Touch, pointer);
        }
    }));

    let touch_end_wm = wm.clone();
    listeners.push(window_event_listener(ev::touchend, move |_| {
        touch_end_wm.release(InputModality::Touch);
    }));

    let touch_cancel_wm = wm.clone();
    listeners.push(window_event_listener(ev::touchcancel, move |_| {
        touch_cancel_wm.release(InputModality::Touch);
    }));

    let (key_nav, key_menu) = (keyboard.clone(), menu.cloned());
    listeners.push(window_event_listener(ev::keydown, move |ev| {
        route_keydown(&key_nav, key_menu.as_ref(), &ev);
    }));

    let resize_wm = wm.clone();
    listeners.push(window_event_listener(ev::resize, move |_| {
        resize_wm.sync_viewport();
    }));

    listeners
}

fn watch_breakpoint(wm: &WindowManager, breakpoint_px: i32) -> Option<MediaBinding> {
    let window = web_sys::window()?;
    let query = match window.match_media(&mobile_media_query(breakpoint_px)) {
        Ok(Some(query)) => query,
        Ok(None) => return None,
        Err(err) => {
            logging::warn!("matchMedia failed: {err:?}");
            return None;
        }
    };
    wm.set_mobile(query.matches());

    let media_wm = wm.clone();
    let on_change = Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(
        move |ev: web_sys::MediaQueryListEvent| media_wm.set_mobile(ev.matches()),
    );
    if let Err(err) =
        query.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
    {
        logging::warn!("failed to watch `{}`: {err:?}", query.media());
        return None;
    }
    Some(MediaBinding { query, on_change })
}

fn first_touch(ev: &web_sys::TouchEvent) -> Option<PointerPosition> {
    let touch = ev.touches().get(0)?;
    Some(PointerPosition::new(touch.client_x(), touch.client_y()))
}

/// Window and region under a press target.
fn press_target(target: Option<&web_sys::EventTarget>) -> Option<(WindowId, PressRegion)> {
    let window = dom::closest(target, WINDOW_SELECTOR)?;
    let id = window_id_from_element_id(&window.id())?.to_string();
    let region = if dom::closest(target, TITLE_BAR_CONTROLS_SELECTOR).is_some() {
        PressRegion::TitleBarControls
    } else if dom::closest(target, TITLE_BAR_SELECTOR).is_some() {
        PressRegion::TitleBar
    } else {
        PressRegion::Body
    };
    Some((WindowId::new(id), region))
}

fn press(
    wm: &WindowManager,
    modality: InputModality,
    target: Option<&web_sys::EventTarget>,
    pointer: PointerPosition,
) -> bool {
    let Some((id, region)) = press_target(target) else {
        return false;
    };
    wm.press(modality, id.as_str(), region, pointer)
}

fn route_click(wm: &WindowManager, menu: Option<&MenuBinding>, ev: &web_sys::MouseEvent) {
    let target = ev.target();
    let target = target.as_ref();

    if let Some(close) = dom::closest(target, CLOSE_BUTTON_SELECTOR) {
        if let Some(id) = close.get_attribute("data-close-window") {
            wm.close(&id);
        }
        return;
    }

    if let Some(binding) = menu {
        if binding.menu.is_shut_down() && binding.surface.shutdown_overlay_contains(target) {
            binding.menu.dismiss_shutdown();
            return;
        }
        if dom::closest(target, SHUTDOWN_BUTTON_SELECTOR).is_some() {
            binding.menu.shutdown();
            return;
        }
        if binding.surface.button_contains(target) {
            binding.menu.toggle();
            return;
        }
        if binding.surface.menu_contains(target) {
            if let Some(item) = dom::closest(target, OPEN_WINDOW_SELECTOR) {
                binding
                    .menu
                    .activate_item(item.get_attribute("data-open-window").as_deref());
            }
            return;
        }
        binding.menu.handle_outside_click();
    }

    if let Some(icon) = dom::closest(target, DESKTOP_ICON_SELECTOR) {
        if let Some(id) = icon.get_attribute("data-window") {
            wm.activate_icon(&id, js_sys::Date::now() as u64);
        }
    }
}

fn route_keydown(
    keyboard: &KeyboardNavigator,
    menu: Option<&MenuBinding>,
    ev: &web_sys::KeyboardEvent,
) {
    let key = ev.key();
    if let Some(binding) = menu {
        // Any key takes the shutdown alert down, then still reaches the handlers below.
        binding.menu.dismiss_shutdown();
        match key.as_str() {
            "Escape" => {
                binding.menu.handle_escape();
            }
            "ArrowDown" | "ArrowUp" if binding.surface.menu_contains(ev.target().as_ref()) => {
                if binding.menu.handle_arrow(key == "ArrowDown") {
                    ev.prevent_default();
                }
                return;
            }
            _ => {}
        }
    }

    if let Some(nav) = NavKey::from_key(&key, ev.shift_key()) {
        if keyboard.handle_key(nav) {
            ev.prevent_default();
        }
    }
}
