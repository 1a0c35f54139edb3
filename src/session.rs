use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{error, info};

use crate::detection::{Detector, MultiThresholdDetector, preprocessing};
use crate::error::{DetectError, DetectResult};
use crate::models::{DetectionBox, DisplayBox};
use crate::persist::{ResultPersister, SavedResults};
use crate::view::{self, Size, ZoomDirection};

pub const WELCOME_STATUS: &str = "Upload a house image to begin";
pub const NOTHING_TO_SAVE_STATUS: &str = "No detection results to save";

/// The image currently on screen
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: DynamicImage,
}

impl LoadedImage {
    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(SavedResults),
    NothingToSave,
}

/// Transient state of the workbench: one image, its boxes, and the display scale.
#[derive(Debug)]
pub struct DetectionSession {
    loaded: Option<LoadedImage>,
    boxes: Vec<DetectionBox>,
    scale: f32,
    viewport: Size,
}

impl DetectionSession {
    pub fn new(viewport: Size) -> Self {
        Self {
            loaded: None,
            boxes: Vec::new(),
            scale: 1.0,
            viewport,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedImage> {
        self.loaded.as_ref()
    }

    pub fn boxes(&self) -> &[DetectionBox] {
        &self.boxes
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Decode `path`, run the threshold sweep and replace the session contents.
    ///
    /// Nothing changes if decoding or detection fails.
    pub fn load_image<D: Detector>(
        &mut self,
        path: &Path,
        detector: &MultiThresholdDetector<D>,
    ) -> DetectResult<&LoadedImage> {
        let image = preprocessing::load_image(path)?;
        let boxes = detector.detect(path)?;

        let loaded = LoadedImage {
            path: path.to_path_buf(),
            image,
        };
        self.scale = view::scale_factor(loaded.size(), self.viewport);
        self.boxes = boxes;

        info!(
            image = %path.display(),
            boxes = self.boxes.len(),
            scale = self.scale,
            "image loaded"
        );

        let loaded = self.loaded.insert(loaded);
        Ok(&*loaded)
    }

    /// Apply one zoom event. Ignored until an image is loaded.
    pub fn zoom(&mut self, direction: ZoomDirection) -> f32 {
        if let Some(loaded) = &self.loaded {
            self.scale = view::zoom(self.scale, direction, loaded.size());
        }
        self.scale
    }

    pub fn display_boxes(&self) -> Vec<DisplayBox> {
        self.boxes
            .iter()
            .map(|b| view::to_display(b, self.scale))
            .collect()
    }

    pub fn save(&self, persister: &ResultPersister) -> DetectResult<SaveOutcome> {
        let Some(loaded) = &self.loaded else {
            return Ok(SaveOutcome::NothingToSave);
        };

        Ok(match persister.save(&loaded.image, &self.boxes)? {
            Some(saved) => SaveOutcome::Saved(saved),
            None => SaveOutcome::NothingToSave,
        })
    }
}

/// One-line status text for a finished action. Failures are logged here.
pub fn status_line<T>(result: &DetectResult<T>, describe: impl FnOnce(&T) -> String) -> String {
    match result {
        Ok(value) => describe(value),
        Err(e) => {
            error!(error = %e, "action failed");
            error_status(e)
        }
    }
}

pub fn error_status(err: &DetectError) -> String {
    format!("Error: {err}")
}

pub fn loaded_status(loaded: &LoadedImage) -> String {
    format!("Loaded house image: {}", loaded.file_name())
}

pub fn save_status(outcome: &SaveOutcome) -> String {
    match outcome {
        SaveOutcome::Saved(saved) => format!(
            "Saved detection results:\nImage: {}\nCoordinates: {}",
            saved.image_path.display(),
            saved.coords_path.display()
        ),
        SaveOutcome::NothingToSave => NOTHING_TO_SAVE_STATUS.to_string(),
    }
}
