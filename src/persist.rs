use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use tracing::info;

use crate::annotate::{self, LabelFont};
use crate::error::{DetectError, DetectResult};
use crate::models::{DetectionBox, DetectionClass};

pub const DEFAULT_OUTPUT_DIR: &str = "detection_results";
pub const ANNOTATED_IMAGE_NAME: &str = "detected_hou3.jpg";
pub const COORDINATES_FILE_NAME: &str = "coordinates_hou3.txt";

/// Paths written by a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedResults {
    pub image_path: PathBuf,
    pub coords_path: PathBuf,
}

/// Writes the annotated image and coordinate listing to a fixed pair of files.
///
/// Every save overwrites the previous one.
pub struct ResultPersister {
    output_dir: PathBuf,
    font: Option<LabelFont>,
}

impl ResultPersister {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            font: None,
        }
    }

    pub fn with_font(mut self, font: Option<LabelFont>) -> Self {
        self.font = font;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn font(&self) -> Option<&LabelFont> {
        self.font.as_ref()
    }

    pub fn image_path(&self) -> PathBuf {
        self.output_dir.join(ANNOTATED_IMAGE_NAME)
    }

    pub fn coords_path(&self) -> PathBuf {
        self.output_dir.join(COORDINATES_FILE_NAME)
    }

    /// Persist `boxes` drawn over `image`. Returns `Ok(None)` without touching
    /// the filesystem when there is nothing to save.
    pub fn save(
        &self,
        image: &DynamicImage,
        boxes: &[DetectionBox],
    ) -> DetectResult<Option<SavedResults>> {
        if boxes.is_empty() {
            return Ok(None);
        }

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| DetectError::io(&self.output_dir, e))?;

        let image_path = self.image_path();
        let annotated = annotate::annotate(image, boxes, self.font.as_ref());
        annotated
            .save_with_format(&image_path, ImageFormat::Jpeg)
            .map_err(|e| DetectError::io(&image_path, into_io_error(e)))?;

        let coords_path = self.coords_path();
        write_coordinates(&coords_path, boxes).map_err(|e| DetectError::io(&coords_path, e))?;

        info!(
            image = %image_path.display(),
            coords = %coords_path.display(),
            count = boxes.len(),
            "saved detection results"
        );

        Ok(Some(SavedResults {
            image_path,
            coords_path,
        }))
    }
}

pub(crate) fn into_io_error(err: image::ImageError) -> io::Error {
    match err {
        image::ImageError::IoError(e) => e,
        other => io::Error::other(other),
    }
}

fn write_coordinates(path: &Path, boxes: &[DetectionBox]) -> io::Result<()> {
    let mut out = io::BufWriter::new(fs::File::create(path)?);
    for b in boxes {
        writeln!(out, "{}", b.coordinate_line())?;
    }
    out.flush()
}

/// One parsed line of a coordinate listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateRecord {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub class: Option<DetectionClass>,
}

/// Read a coordinate listing written by [`ResultPersister::save`].
pub fn read_coordinates(path: &Path) -> DetectResult<Vec<CoordinateRecord>> {
    let text = fs::read_to_string(path).map_err(|e| DetectError::io(path, e))?;
    Ok(parse_coordinates(&text))
}

/// Parse `x1:<n> y1:<n> x2:<n> y2:<n> [label]` lines. Lines that don't match are skipped.
pub fn parse_coordinates(text: &str) -> Vec<CoordinateRecord> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<CoordinateRecord> {
    let mut rest = line.trim();
    let mut values = [0i32; 4];

    for (slot, key) in values.iter_mut().zip(["x1:", "y1:", "x2:", "y2:"]) {
        rest = rest.trim_start().strip_prefix(key)?;
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        *slot = rest[..end].parse().ok()?;
        rest = &rest[end..];
    }

    let class = rest.split_whitespace().next().and_then(DetectionClass::from_name);
    let [x1, y1, x2, y2] = values;

    Some(CoordinateRecord {
        x1,
        y1,
        x2,
        y2,
        class,
    })
}
