pub mod nms;
pub mod preprocessing;
pub mod yolo;

use std::path::Path;

use tracing::debug;

use crate::error::{DetectError, DetectResult};
use crate::models::DetectionBox;

pub use yolo::YoloDetector;

/// Confidence thresholds swept by [`MultiThresholdDetector`], in run order.
pub const CONFIDENCE_THRESHOLDS: [f32; 3] = [0.3, 0.5, 0.7];

/// A single inference pass over an image file at one confidence threshold.
pub trait Detector {
    fn infer(&self, image_path: &Path, threshold: f32) -> DetectResult<Vec<DetectionBox>>;
}

impl<D: Detector + ?Sized> Detector for &D {
    fn infer(&self, image_path: &Path, threshold: f32) -> DetectResult<Vec<DetectionBox>> {
        (**self).infer(image_path, threshold)
    }
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn infer(&self, image_path: &Path, threshold: f32) -> DetectResult<Vec<DetectionBox>> {
        (**self).infer(image_path, threshold)
    }
}

/// Reject thresholds outside the open interval (0, 1)
pub fn check_threshold(image_path: &Path, threshold: f32) -> DetectResult<()> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(DetectError::inference(
            image_path,
            format!("confidence threshold {threshold} is outside (0, 1)"),
        ))
    }
}

/// Runs a detector at every threshold in [`CONFIDENCE_THRESHOLDS`] and
/// concatenates the results.
///
/// Passes are not merged: an object found at 0.3, 0.5 and 0.7 shows up three
/// times. If any pass fails the whole call fails and earlier passes are dropped.
pub struct MultiThresholdDetector<D> {
    detector: D,
}

impl<D: Detector> MultiThresholdDetector<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detect(&self, image_path: &Path) -> DetectResult<Vec<DetectionBox>> {
        let mut boxes = Vec::new();

        for threshold in CONFIDENCE_THRESHOLDS {
            let pass = self.detector.infer(image_path, threshold)?;
            debug!(threshold, count = pass.len(), "detection pass finished");
            boxes.extend(pass);
        }

        Ok(boxes)
    }
}
