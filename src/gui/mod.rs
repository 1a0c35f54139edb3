mod app;
mod message;
mod widgets;

pub use app::{DetectionApp, run};
pub use message::Message;
