//! Mapping between original-image pixels and canvas pixels.

use crate::models::{DetectionBox, DisplayBox};

/// Multiplier applied per zoom-in event
pub const ZOOM_IN_STEP: f32 = 1.1;
/// Multiplier applied per zoom-out event
pub const ZOOM_OUT_STEP: f32 = 0.9;

/// Longest canvas side zooming in may reach
pub const MAX_DISPLAY_SIDE: u32 = 8192;
/// Longest canvas side zooming out may reach
pub const MIN_DISPLAY_SIDE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn longest_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Scale that fits the whole image inside the viewport.
///
/// Falls back to `1.0` when the viewport has no extent yet (or the image is empty).
pub fn scale_factor(image: Size, viewport: Size) -> f32 {
    if viewport.is_empty() || image.is_empty() {
        return 1.0;
    }

    let sx = viewport.width as f32 / image.width as f32;
    let sy = viewport.height as f32 / image.height as f32;
    sx.min(sy)
}

/// Scale a box into canvas space, truncating toward zero.
pub fn to_display(b: &DetectionBox, scale: f32) -> DisplayBox {
    let s = |v: i32| (v as f32 * scale) as i32;
    DisplayBox {
        x1: s(b.x1),
        y1: s(b.y1),
        x2: s(b.x2),
        y2: s(b.y2),
    }
}

/// Scale range for `image` such that its longest canvas side stays within
/// [`MIN_DISPLAY_SIDE`, `MAX_DISPLAY_SIDE`].
pub fn scale_bounds(image: Size) -> (f32, f32) {
    if image.is_empty() {
        return (1.0, 1.0);
    }
    let longest = image.longest_side() as f32;
    (
        MIN_DISPLAY_SIDE as f32 / longest,
        MAX_DISPLAY_SIDE as f32 / longest,
    )
}

/// Apply one discrete zoom event to an image of size `image`.
///
/// The result stays inside [`scale_bounds`]. A scale that already lies outside
/// them is never pushed further out, and zooming never moves the scale in the
/// opposite direction.
pub fn zoom(current: f32, direction: ZoomDirection, image: Size) -> f32 {
    let (lo, hi) = scale_bounds(image);
    match direction {
        ZoomDirection::In => (current * ZOOM_IN_STEP).min(hi.max(current)),
        ZoomDirection::Out => (current * ZOOM_OUT_STEP).max(lo.min(current)),
    }
}

/// Zoom direction for a Ctrl+wheel notch. Scrolling up zooms in.
pub fn wheel_zoom(delta_y: f32) -> Option<ZoomDirection> {
    if delta_y > 0.0 {
        Some(ZoomDirection::In)
    } else if delta_y < 0.0 {
        Some(ZoomDirection::Out)
    } else {
        None
    }
}

/// Canvas size of an image drawn at `scale` (never smaller than 1x1).
pub fn display_size(image: Size, scale: f32) -> Size {
    Size {
        width: ((image.width as f32 * scale) as u32).max(1),
        height: ((image.height as f32 * scale) as u32).max(1),
    }
}
