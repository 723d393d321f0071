//! Window-manager tuning constants and the built-in window catalog.
//!
//! The catalog is authored in `desktop.toml`, validated by `build.rs`, and embedded as JSON.
//! Pages may override tuning at runtime with a JSON payload via [`WindowManagerConfig::from_json_str`].

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

include!(concat!(env!("OUT_DIR"), "/desktop_catalog_generated.rs"));

/// Errors raised while loading a runtime configuration override.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The payload was not valid JSON for [`WindowManagerConfig`].
    #[error("invalid window manager config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The payload parsed but carries values the window manager cannot honor.
    #[error("window manager config rejected: {0}")]
    Invalid(String),
}

/// Tuning knobs for stacking, clamping, breakpoint detection, and icon activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowManagerConfig {
    /// Reserved z-index floor; the first fronted window receives `baseline + 1`.
    pub z_index_baseline: u32,
    /// Viewports narrower than this width (in CSS px) are in mobile mode.
    pub mobile_breakpoint_px: i32,
    /// Maximum gap between two icon clicks that still counts as a double click.
    pub double_click_ms: u64,
    /// Height of the menu strip windows may never cover.
    pub top_chrome_px: i32,
    /// Horizontal sliver of a window that must stay inside the viewport.
    pub min_visible_width_px: i32,
    /// Vertical sliver of a window that must stay inside the viewport.
    pub min_visible_height_px: i32,
    /// Lower bound of the randomized default offset for windows without explicit defaults.
    pub default_offset_min_px: i32,
    /// Width of the randomized default offset range.
    pub default_offset_span_px: i32,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        builtin_catalog().window_manager.clone()
    }
}

impl WindowManagerConfig {
    /// Parses a JSON override; missing fields fall back to the built-in catalog values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`] when a
    /// parsed value would break clamping or breakpoint detection.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Value = serde_json::from_str(raw)?;
        let Some(overrides) = overrides.as_object() else {
            return Err(ConfigError::Invalid(
                "config override must be a JSON object".to_string(),
            ));
        };

        let mut merged = serde_json::to_value(Self::default())?;
        if let Some(base) = merged.as_object_mut() {
            for (key, value) in overrides {
                base.insert(key.clone(), value.clone());
            }
        }

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values the window manager relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mobile_breakpoint_px <= 0 {
            return Err(ConfigError::Invalid(
                "mobile_breakpoint_px must be positive".to_string(),
            ));
        }
        if self.min_visible_width_px < 0 || self.min_visible_height_px < 0 {
            return Err(ConfigError::Invalid(
                "visible sliver sizes must not be negative".to_string(),
            ));
        }
        if self.top_chrome_px < 0 {
            return Err(ConfigError::Invalid(
                "top_chrome_px must not be negative".to_string(),
            ));
        }
        if self.default_offset_span_px < 0 {
            return Err(ConfigError::Invalid(
                "default_offset_span_px must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// One window known to the desktop at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogWindow {
    /// Stable window id (matches the `window-<id>` element and `data-window` icons).
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Explicit default x position.
    #[serde(default)]
    pub default_x: Option<i32>,
    /// Explicit default y position.
    #[serde(default)]
    pub default_y: Option<i32>,
    /// Whether the terminal `open` command may target this window.
    #[serde(default)]
    pub terminal_target: bool,
}

/// Build-time desktop catalog: tuning plus known windows in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopCatalog {
    /// Catalog schema version.
    pub schema_version: u32,
    /// Default window-manager tuning.
    pub window_manager: WindowManagerConfig,
    /// Known windows.
    pub windows: Vec<CatalogWindow>,
}

impl DesktopCatalog {
    /// Looks up a catalog entry by id.
    pub fn window(&self, id: &str) -> Option<&CatalogWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Ids the terminal `open` command accepts, in catalog order.
    pub fn terminal_targets(&self) -> impl Iterator<Item = &str> {
        self.windows
            .iter()
            .filter(|w| w.terminal_target)
            .map(|w| w.id.as_str())
    }
}

/// Returns the parsed built-in catalog.
pub fn builtin_catalog() -> &'static DesktopCatalog {
    static CATALOG: OnceLock<DesktopCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(DESKTOP_CATALOG_JSON)
            .expect("generated desktop catalog should parse")
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_catalog_carries_reserved_baseline_and_breakpoint() {
        let config = WindowManagerConfig::default();
        assert_eq!(config.z_index_baseline, 100);
        assert_eq!(config.mobile_breakpoint_px, 768);
        assert_eq!(config.double_click_ms, 300);
        assert_eq!(config.top_chrome_px, 24);
        assert_eq!(
            (config.min_visible_width_px, config.min_visible_height_px),
            (100, 50)
        );
    }

    #[test]
    fn terminal_targets_follow_catalog_order() {
        let targets: Vec<&str> = builtin_catalog().terminal_targets().collect();
        assert_eq!(
            targets,
            vec!["about", "projects", "writing", "contact", "notes", "terminal", "calc"]
        );
    }

    #[test]
    fn json_override_keeps_unspecified_fields() {
        let config = WindowManagerConfig::from_json_str(r#"{ "mobile_breakpoint_px": 600 }"#)
            .expect("valid override");
        assert_eq!(config.mobile_breakpoint_px, 600);
        assert_eq!(config.z_index_baseline, 100);
    }

    #[test]
    fn json_override_rejects_non_positive_breakpoint() {
        let err = WindowManagerConfig::from_json_str(r#"{ "mobile_breakpoint_px": 0 }"#)
            .expect_err("breakpoint must be positive");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_object_override_is_rejected() {
        let err = WindowManagerConfig::from_json_str("[1, 2]").expect_err("array payload");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = WindowManagerConfig::from_json_str("{ nope").expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
