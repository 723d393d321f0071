//! Browser entry for the retro desktop site: boots the window manager over the served markup.

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();

    let config = platform_host_web::page_config();
    match platform_host_web::DesktopBindings::install(config) {
        Ok(bindings) => std::mem::forget(bindings),
        Err(err) => leptos::logging::error!("desktop boot failed: {err}"),
    }
}
