use std::path::PathBuf;

use iced::keyboard::Modifiers;
use iced::mouse::ScrollDelta;

use crate::view::ZoomDirection;

#[derive(Debug, Clone)]
pub enum Message {
    BrowseImage,
    ImageSelected(Option<PathBuf>),
    Zoom(ZoomDirection),
    SaveResults,
    ModifiersChanged(Modifiers),
    WheelScrolled(ScrollDelta),
}
