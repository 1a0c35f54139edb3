use std::path::{Path, PathBuf};

use rten::Model;
use rten_tensor::NdTensor;
use rten_tensor::prelude::*;
use tracing::{debug, info, warn};

use crate::detection::nms::{self, DEFAULT_IOU_THRESHOLD};
use crate::detection::{Detector, check_threshold, preprocessing};
use crate::error::{DetectError, DetectResult};
use crate::models::{DetectionBox, DetectionClass};

/// Square input resolution the model was trained at
pub const DEFAULT_INPUT_SIZE: u32 = 640;

/// Upper bound on boxes returned from one pass
pub const MAX_DETECTIONS: usize = 300;

/// YOLOv8-style detector running an exported `.rten` model.
pub struct YoloDetector {
    model: Model,
    weights_path: PathBuf,
    input_size: u32,
}

impl YoloDetector {
    /// Load weights from disk. A missing or unparseable file is a [`DetectError::ModelLoad`].
    pub fn load(weights_path: &Path) -> DetectResult<Self> {
        Self::load_with_input_size(weights_path, DEFAULT_INPUT_SIZE)
    }

    pub fn load_with_input_size(weights_path: &Path, input_size: u32) -> DetectResult<Self> {
        if !weights_path.exists() {
            return Err(DetectError::model_load(
                weights_path,
                "weight file not found",
            ));
        }
        if input_size == 0 {
            return Err(DetectError::model_load(weights_path, "input size must be positive"));
        }

        let model = Model::load_file(weights_path)
            .map_err(|e| DetectError::model_load(weights_path, e))?;

        info!(path = %weights_path.display(), input_size, "model loaded");

        Ok(Self {
            model,
            weights_path: weights_path.to_path_buf(),
            input_size,
        })
    }

    pub fn weights_path(&self) -> &Path {
        &self.weights_path
    }
}

impl Detector for YoloDetector {
    fn infer(&self, image_path: &Path, threshold: f32) -> DetectResult<Vec<DetectionBox>> {
        check_threshold(image_path, threshold)?;

        let img = preprocessing::load_image(image_path)?;
        let input = preprocessing::to_model_input(&img, self.input_size);

        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|e| DetectError::inference(image_path, e))?;
        let output: NdTensor<f32, 3> = output.try_into().map_err(|_| {
            DetectError::inference(image_path, "model output is not a 3-D float tensor")
        })?;

        let (rows, candidates) = (output.size(1), output.size(2));
        let data = output.to_vec();

        let frame = OutputFrame {
            rows,
            candidates,
            input_size: self.input_size,
            image_width: img.width(),
            image_height: img.height(),
        };
        let raw = decode_output(&data, &frame, threshold);
        let mut boxes = nms::non_max_suppression(raw, DEFAULT_IOU_THRESHOLD);
        boxes.truncate(MAX_DETECTIONS);

        debug!(
            image = %image_path.display(),
            threshold,
            count = boxes.len(),
            "inference pass"
        );

        Ok(boxes)
    }
}

/// Geometry needed to interpret one image's worth of raw model output.
#[derive(Debug, Clone, Copy)]
pub struct OutputFrame {
    /// `4 + number_of_classes`
    pub rows: usize,
    pub candidates: usize,
    pub input_size: u32,
    pub image_width: u32,
    pub image_height: u32,
}

/// Decode a row-major `[4 + classes, candidates]` YOLO head.
///
/// Each column holds centre-x, centre-y, width and height in model-input
/// pixels followed by one score per class. Non-finite scores never win, and
/// candidates whose best score is below `threshold` or whose geometry is not
/// finite are skipped. Coordinates are mapped back to the original
/// image and clipped to its bounds.
pub fn decode_output(data: &[f32], frame: &OutputFrame, threshold: f32) -> Vec<DetectionBox> {
    let OutputFrame {
        rows,
        candidates,
        input_size,
        image_width,
        image_height,
    } = *frame;

    if rows <= 4 || data.len() < rows * candidates {
        return Vec::new();
    }

    let at = |row: usize, col: usize| data[row * candidates + col];
    let sx = image_width as f32 / input_size as f32;
    let sy = image_height as f32 / input_size as f32;
    let max_x = image_width as f32;
    let max_y = image_height as f32;

    let mut boxes = Vec::new();
    for i in 0..candidates {
        let Some((class_id, score)) = (4..rows)
            .map(|r| (r - 4, at(r, i)))
            .filter(|(_, score)| score.is_finite())
            .max_by(|a, b| a.1.total_cmp(&b.1))
        else {
            continue;
        };

        if score < threshold {
            continue;
        }

        let Some(class) = DetectionClass::from_id(class_id) else {
            warn!(class_id, score, "dropping detection with unknown class id");
            continue;
        };

        let (cx, cy, w, h) = (at(0, i), at(1, i), at(2, i), at(3, i));
        if ![cx, cy, w, h].iter().all(|v| v.is_finite()) {
            continue;
        }
        let x1 = ((cx - w / 2.0) * sx).clamp(0.0, max_x);
        let y1 = ((cy - h / 2.0) * sy).clamp(0.0, max_y);
        let x2 = ((cx + w / 2.0) * sx).clamp(0.0, max_x);
        let y2 = ((cy + h / 2.0) * sy).clamp(0.0, max_y);

        if let Some(b) = DetectionBox::new(x1 as i32, y1 as i32, x2 as i32, y2 as i32, score, class)
        {
            boxes.push(b);
        }
    }

    boxes
}
