use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use rten_tensor::NdTensor;

use crate::error::{DetectError, DetectResult};

/// Read and decode an image file. Undecodable input is an inference failure.
pub fn load_image(path: &Path) -> DetectResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| DetectError::inference(path, format!("cannot open image: {e}")))?;

    reader
        .decode()
        .map_err(|e| DetectError::inference(path, format!("failed to decode image: {e}")))
}

/// Resize to a square `size`x`size` RGB image and pack it as a normalised
/// `[1, 3, size, size]` tensor.
pub fn to_model_input(img: &DynamicImage, size: u32) -> NdTensor<f32, 4> {
    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, size, size, FilterType::Triangle);

    let side = size as usize;
    let mut input = NdTensor::zeros([1, 3, side, side]);
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        input[[0, 0, y, x]] = pixel[0] as f32 / 255.0;
        input[[0, 1, y, x]] = pixel[1] as f32 / 255.0;
        input[[0, 2, y, x]] = pixel[2] as f32 / 255.0;
    }

    input
}
