//! Viewport clamping for window positions.
//!
//! Only a sliver of each window (`min(size, sliver)`) has to stay inside the viewport, so a window
//! can be pushed mostly off-screen while its title bar stays reachable. The top strip is reserved
//! for the menu bar and is never covered.

use crate::{
    config::WindowManagerConfig,
    model::{ElementSize, Position, Viewport},
};

/// Height of the menu strip windows may not cover.
pub const TOP_CHROME_PX: i32 = 24;
/// Horizontal sliver that must remain on-screen.
pub const MIN_VISIBLE_WIDTH_PX: i32 = 100;
/// Vertical sliver that must remain on-screen.
pub const MIN_VISIBLE_HEIGHT_PX: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampBounds {
    pub top_chrome_px: i32,
    pub min_visible_width_px: i32,
    pub min_visible_height_px: i32,
}

impl Default for ClampBounds {
    fn default() -> Self {
        Self {
            top_chrome_px: TOP_CHROME_PX,
            min_visible_width_px: MIN_VISIBLE_WIDTH_PX,
            min_visible_height_px: MIN_VISIBLE_HEIGHT_PX,
        }
    }
}

impl From<&WindowManagerConfig> for ClampBounds {
    fn from(config: &WindowManagerConfig) -> Self {
        Self {
            top_chrome_px: config.top_chrome_px,
            min_visible_width_px: config.min_visible_width_px,
            min_visible_height_px: config.min_visible_height_px,
        }
    }
}

impl ClampBounds {
    /// Maps a proposed position to the nearest valid one. Total for every input.
    pub fn clamp(&self, proposed: Position, element: ElementSize, viewport: Viewport) -> Position {
        let max_x = viewport
            .width
            .saturating_sub(element.width.min(self.min_visible_width_px));
        let max_y = viewport
            .height
            .saturating_sub(element.height.min(self.min_visible_height_px));

        Position {
            x: bound(proposed.x, 0, max_x),
            y: bound(proposed.y, self.top_chrome_px, max_y),
        }
    }

    /// Whether `position` is already a fixed point of [`Self::clamp`].
    pub fn contains(&self, position: Position, element: ElementSize, viewport: Viewport) -> bool {
        self.clamp(position, element, viewport) == position
    }
}

/// Clamps `(x, y)` using the default chrome and sliver sizes.
pub fn clamp_position(
    x: i32,
    y: i32,
    element_width: i32,
    element_height: i32,
    viewport_width: i32,
    viewport_height: i32,
) -> (i32, i32) {
    let clamped = ClampBounds::default().clamp(
        Position::new(x, y),
        ElementSize::new(element_width, element_height),
        Viewport::new(viewport_width, viewport_height),
    );
    (clamped.x, clamped.y)
}

// Lower bound wins when the viewport is too small for the sliver.
fn bound(value: i32, lower: i32, upper: i32) -> i32 {
    value.min(upper).max(lower)
}
