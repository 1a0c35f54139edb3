use std::io;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::{debug, warn};

use crate::error::{DetectError, DetectResult};
use crate::models::{DetectionBox, DisplayBox};
use crate::view::{self, Size};

/// Fonts tried in order when no label font is configured
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

const LINE_THICKNESS: i32 = 2;
const SAVED_LABEL_SCALE: f32 = 16.0;
const CANVAS_LABEL_SCALE: f32 = 12.0;
/// Canvas outlines: 5px dash, 5px gap
const DASH_ON: i32 = 5;
const DASH_PERIOD: usize = 10;

/// Font used for box labels.
pub struct LabelFont {
    font: FontVec,
    path: PathBuf,
}

impl LabelFont {
    pub fn load(path: &Path) -> DetectResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| DetectError::io(path, e))?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| {
            DetectError::io(path, io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
        })?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// Load the configured font, or the first usable system candidate.
    pub fn discover(configured: Option<&Path>) -> Option<Self> {
        if let Some(path) = configured {
            match Self::load(path) {
                Ok(font) => return Some(font),
                Err(e) => warn!(error = %e, "configured label font unusable"),
            }
        }

        let found = SYSTEM_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .filter(|p| p.exists())
            .find_map(|p| Self::load(p).ok());

        match &found {
            Some(font) => debug!(path = %font.path.display(), "using label font"),
            None => warn!("no label font found; boxes will be drawn without labels"),
        }
        found
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Solid rectangle `LINE_THICKNESS` pixels wide, growing inward. Both corners are included.
fn draw_box(img: &mut RgbImage, b: DisplayBox, color: Rgb<u8>) {
    for inset in 0..LINE_THICKNESS {
        let w = b.x2 - b.x1 + 1 - 2 * inset;
        let h = b.y2 - b.y1 + 1 - 2 * inset;
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(b.x1 + inset, b.y1 + inset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(img, rect, color);
    }
}

/// Start and end (inclusive) of each dash between `start` and `end`
fn dashes(start: i32, end: i32) -> impl Iterator<Item = (f32, f32)> {
    (start..=end)
        .step_by(DASH_PERIOD)
        .map(move |s| (s as f32, (s + DASH_ON - 1).min(end) as f32))
}

/// Dashed outline used on the interactive canvas.
fn draw_dashed_box(img: &mut RgbImage, b: DisplayBox, color: Rgb<u8>) {
    for inset in 0..LINE_THICKNESS {
        let (x1, y1, x2, y2) = (b.x1 + inset, b.y1 + inset, b.x2 - inset, b.y2 - inset);
        if x1 > x2 || y1 > y2 {
            break;
        }
        for (a, z) in dashes(x1, x2) {
            draw_line_segment_mut(img, (a, y1 as f32), (z, y1 as f32), color);
            draw_line_segment_mut(img, (a, y2 as f32), (z, y2 as f32), color);
        }
        for (a, z) in dashes(y1, y2) {
            draw_line_segment_mut(img, (x1 as f32, a), (x1 as f32, z), color);
            draw_line_segment_mut(img, (x2 as f32, a), (x2 as f32, z), color);
        }
    }
}

/// Annotated full-resolution copy of `image`: rectangles plus labels above each box.
pub fn annotate(image: &DynamicImage, boxes: &[DetectionBox], font: Option<&LabelFont>) -> RgbImage {
    let mut out = image.to_rgb8();

    for b in boxes {
        let color = Rgb(b.class.color());
        let rect = view::to_display(b, 1.0);
        draw_box(&mut out, rect, color);

        if let Some(font) = font {
            let label = b.label();
            let scale = PxScale::from(SAVED_LABEL_SCALE);
            let (_, text_h) = text_size(scale, &font.font, &label);
            // baseline sits 5px above the box
            let y = b.y1 - 5 - text_h as i32;
            draw_text_mut(&mut out, color, b.x1, y, scale, &font.font, &label);
        }
    }

    out
}

/// Canvas rendering: the image resized by `scale` with boxes and labels overlaid.
pub fn render_display(
    image: &DynamicImage,
    boxes: &[DetectionBox],
    scale: f32,
    font: Option<&LabelFont>,
) -> RgbaImage {
    let size = view::display_size(Size::new(image.width(), image.height()), scale);
    let mut canvas = image
        .resize_exact(size.width, size.height, image::imageops::FilterType::Triangle)
        .to_rgb8();

    for b in boxes {
        let color = Rgb(b.class.canvas_color());
        let rect = view::to_display(b, scale);
        draw_dashed_box(&mut canvas, rect, color);

        if let Some(font) = font {
            draw_text_mut(
                &mut canvas,
                color,
                rect.x1 + 5,
                rect.y1 + 5,
                PxScale::from(CANVAS_LABEL_SCALE),
                &font.font,
                &format!("{} ({:.2})", b.class, b.confidence),
            );
        }
    }

    DynamicImage::ImageRgb8(canvas).to_rgba8()
}
