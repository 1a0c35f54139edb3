//! Placing replacement images into previously detected boxes.
//!
//! Works from the pair of files written by [`ResultPersister`](crate::ResultPersister):
//! the annotated image is the background and the coordinate listing gives the
//! target rectangles.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::error::{DetectError, DetectResult};
use crate::persist::{self, ANNOTATED_IMAGE_NAME, COORDINATES_FILE_NAME, CoordinateRecord};

/// Composite written by the `place` command
pub const PLACED_IMAGE_NAME: &str = "placed_hou3.png";

/// First record whose rectangle contains `(x, y)`. All four edges count as inside.
pub fn box_at_point(x: i32, y: i32, records: &[CoordinateRecord]) -> Option<&CoordinateRecord> {
    records
        .iter()
        .find(|r| x >= r.x1 && x <= r.x2 && y >= r.y1 && y <= r.y2)
}

/// Opacity in `[0, 1]`; NaN means fully transparent.
fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        0.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Stretch `overlay` to the record's rectangle and alpha-blend it onto `canvas`.
fn blend_into(canvas: &mut RgbaImage, overlay: &DynamicImage, record: &CoordinateRecord, opacity: f32) {
    let w = record.x2 - record.x1;
    let h = record.y2 - record.y1;
    if w <= 0 || h <= 0 {
        return;
    }

    let opacity = clamp_opacity(opacity);
    let resized = imageops::resize(&overlay.to_rgba8(), w as u32, h as u32, FilterType::Triangle);
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);

    for (dx, dy, fg) in resized.enumerate_pixels() {
        let (x, y) = (record.x1 + dx as i32, record.y1 + dy as i32);
        if x < 0 || y < 0 || x >= cw || y >= ch {
            continue;
        }

        let alpha = fg[3] as f32 / 255.0 * opacity;
        let bg = canvas.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let mixed = fg[c] as f32 * alpha + bg[c] as f32 * (1.0 - alpha);
            bg[c] = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// `background` with `overlay` resized into `record` at the given opacity.
pub fn place_image(
    background: &DynamicImage,
    overlay: &DynamicImage,
    record: &CoordinateRecord,
    opacity: f32,
) -> RgbaImage {
    let mut canvas = background.to_rgba8();
    blend_into(&mut canvas, overlay, record, opacity);
    canvas
}

/// Decode any image file, reporting failures against `path`.
pub fn open_image(path: &Path) -> DetectResult<DynamicImage> {
    image::open(path).map_err(|e| DetectError::io(path, persist::into_io_error(e)))
}

struct Placement {
    record: CoordinateRecord,
    overlay: DynamicImage,
}

/// Saved detection results plus the images placed over them so far.
///
/// At most one image occupies a box; placing into an occupied box replaces it.
/// One opacity applies to every placement.
pub struct PlacementBoard {
    background: DynamicImage,
    records: Vec<CoordinateRecord>,
    placements: Vec<Placement>,
    opacity: f32,
}

impl PlacementBoard {
    pub fn new(background: DynamicImage, records: Vec<CoordinateRecord>) -> Self {
        Self {
            background,
            records,
            placements: Vec::new(),
            opacity: 1.0,
        }
    }

    /// Load the annotated image and coordinate listing from a results directory.
    pub fn load(results_dir: &Path) -> DetectResult<Self> {
        let image_path = results_dir.join(ANNOTATED_IMAGE_NAME);
        let coords_path = results_dir.join(COORDINATES_FILE_NAME);

        let background = open_image(&image_path)?;
        let records = persist::read_coordinates(&coords_path)?;

        info!(
            image = %image_path.display(),
            boxes = records.len(),
            "loaded detection results for placement"
        );
        Ok(Self::new(background, records))
    }

    pub fn records(&self) -> &[CoordinateRecord] {
        &self.records
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = clamp_opacity(opacity);
    }

    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Place `overlay` into the box under `(x, y)`. Returns the target box, or
    /// `None` (and leaves the board unchanged) when no box contains the point.
    pub fn place_at(&mut self, x: i32, y: i32, overlay: DynamicImage) -> Option<CoordinateRecord> {
        let record = *box_at_point(x, y, &self.records)?;
        let key = (record.x1, record.y1);

        match self.placements.iter_mut().find(|p| (p.record.x1, p.record.y1) == key) {
            Some(existing) => {
                existing.record = record;
                existing.overlay = overlay;
            }
            None => self.placements.push(Placement { record, overlay }),
        }

        debug!(x, y, x1 = record.x1, y1 = record.y1, "image placed");
        Some(record)
    }

    /// Background with every placement blended in placement order.
    pub fn render(&self) -> RgbaImage {
        let mut canvas = self.background.to_rgba8();
        for p in &self.placements {
            blend_into(&mut canvas, &p.overlay, &p.record, self.opacity);
        }
        canvas
    }

    /// Render and write a PNG to `path`, creating its parent directory.
    pub fn save(&self, path: &Path) -> DetectResult<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DetectError::io(parent, e))?;
        }
        self.render()
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| DetectError::io(path, persist::into_io_error(e)))?;

        info!(path = %path.display(), placed = self.placements.len(), "saved placement");
        Ok(path.to_path_buf())
    }
}
