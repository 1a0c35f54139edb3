#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use doorwin::{DetectError, DetectResult, DetectionBox, DetectionClass, Detector};
use image::{ImageBuffer, Rgb};
use tempfile::NamedTempFile;

/// Creates a `width`x`height` gradient PNG and returns the temp file.
/// The file will be automatically cleaned up when dropped.
pub fn create_test_image(width: u32, height: u32) -> NamedTempFile {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128u8])
    });
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Creates a temp file with a `.jpg` suffix that is not an image.
pub fn create_corrupt_image() -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".jpg")
        .tempfile()
        .expect("Failed to create temp file");
    std::fs::write(file.path(), b"definitely not a jpeg").expect("Failed to write temp file");
    file
}

pub fn door(x1: i32, y1: i32, x2: i32, y2: i32, confidence: f32) -> DetectionBox {
    DetectionBox::new(x1, y1, x2, y2, confidence, DetectionClass::Door).expect("valid door box")
}

pub fn window(x1: i32, y1: i32, x2: i32, y2: i32, confidence: f32) -> DetectionBox {
    DetectionBox::new(x1, y1, x2, y2, confidence, DetectionClass::Window).expect("valid window box")
}

fn key(threshold: f32) -> u32 {
    (threshold * 100.0).round() as u32
}

/// Detector returning canned boxes per threshold and recording every call.
#[derive(Default)]
pub struct ScriptedDetector {
    responses: HashMap<u32, Vec<DetectionBox>>,
    failing: Option<u32>,
    pub calls: RefCell<Vec<(PathBuf, f32)>>,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, threshold: f32, boxes: Vec<DetectionBox>) -> Self {
        self.responses.insert(key(threshold), boxes);
        self
    }

    pub fn fail_at(mut self, threshold: f32) -> Self {
        self.failing = Some(key(threshold));
        self
    }

    pub fn thresholds_called(&self) -> Vec<f32> {
        self.calls.borrow().iter().map(|(_, t)| *t).collect()
    }
}

impl Detector for ScriptedDetector {
    fn infer(&self, image_path: &Path, threshold: f32) -> DetectResult<Vec<DetectionBox>> {
        self.calls
            .borrow_mut()
            .push((image_path.to_path_buf(), threshold));

        if self.failing == Some(key(threshold)) {
            return Err(DetectError::inference(image_path, "scripted failure"));
        }

        Ok(self
            .responses
            .get(&key(threshold))
            .cloned()
            .unwrap_or_default())
    }
}

/// A detector that finds the same door and window at every threshold.
pub fn duplicating_detector() -> ScriptedDetector {
    ScriptedDetector::new()
        .respond(0.3, vec![door(100, 100, 200, 300, 0.92), window(300, 80, 380, 160, 0.41)])
        .respond(0.5, vec![door(101, 99, 201, 301, 0.91)])
        .respond(0.7, vec![door(100, 100, 200, 300, 0.92)])
}
