use std::path::PathBuf;

use crate::detection::yolo::DEFAULT_INPUT_SIZE;
use crate::persist::DEFAULT_OUTPUT_DIR;
use crate::view::Size;

pub const DEFAULT_WEIGHTS_PATH: &str = "weights/best.rten";

/// Canvas area next to the control panel in the default 1000x700 window
pub const DEFAULT_VIEWPORT: Size = Size::new(720, 600);

/// Runtime settings shared by the CLI and the GUI
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub weights_path: PathBuf,
    pub output_dir: PathBuf,
    /// Explicit label font; system fonts are tried when unset
    pub label_font: Option<PathBuf>,
    pub input_size: u32,
    pub viewport: Size,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weights_path: PathBuf::from(DEFAULT_WEIGHTS_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            label_font: None,
            input_size: DEFAULT_INPUT_SIZE,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

/// Parse a `WIDTHxHEIGHT` viewport string such as `720x600`.
pub fn parse_viewport(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let height = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    Ok(Size::new(width, height))
}

/// Parse an opacity in `[0, 1]`.
pub fn parse_opacity(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid opacity '{s}'"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("opacity must be between 0 and 1, got {value}"));
    }
    Ok(value)
}
