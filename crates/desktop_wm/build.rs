use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowManagerTuning {
    z_index_baseline: u32,
    mobile_breakpoint_px: i32,
    double_click_ms: u64,
    top_chrome_px: i32,
    min_visible_width_px: i32,
    min_visible_height_px: i32,
    default_offset_min_px: i32,
    default_offset_span_px: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogWindow {
    id: String,
    title: String,
    #[serde(default)]
    default_x: Option<i32>,
    #[serde(default)]
    default_y: Option<i32>,
    #[serde(default)]
    terminal_target: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopCatalog {
    schema_version: u32,
    window_manager: WindowManagerTuning,
    windows: Vec<CatalogWindow>,
}

fn validate(catalog: &DesktopCatalog, path: &str) {
    if catalog.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {path}: expected 1 found {}",
            catalog.schema_version
        );
    }

    let tuning = &catalog.window_manager;
    if tuning.mobile_breakpoint_px <= 0 {
        panic!("mobile_breakpoint_px in {path} must be positive");
    }
    if tuning.min_visible_width_px < 0 || tuning.min_visible_height_px < 0 {
        panic!("visible sliver sizes in {path} must not be negative");
    }
    if tuning.top_chrome_px < 0 || tuning.default_offset_span_px < 0 {
        panic!("top_chrome_px and default_offset_span_px in {path} must not be negative");
    }

    let mut seen = HashSet::new();
    for window in &catalog.windows {
        if window.id.trim().is_empty() {
            panic!("window with empty id in {path}");
        }
        if !seen.insert(window.id.as_str()) {
            panic!("duplicate window id `{}` in {path}", window.id);
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("desktop.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: DesktopCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&catalog, &path.display().to_string());

    let json = serde_json::to_string_pretty(&catalog).expect("serialize desktop catalog");
    let generated = format!(
        "/// Build-time generated desktop catalog JSON.\n\
pub const DESKTOP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
