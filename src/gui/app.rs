use std::sync::Arc;

use iced::{
    Element, Event, Length, Subscription, Task, event, keyboard, mouse,
    widget::{
        Image, column, container,
        image::Handle,
        scrollable::{self, Scrollbar},
        text,
    },
};
use rfd::AsyncFileDialog;

use super::Message;
use super::widgets::{action_button, layout, section};
use crate::annotate::{self, LabelFont};
use crate::config::AppConfig;
use crate::detection::{MultiThresholdDetector, YoloDetector};
use crate::persist::ResultPersister;
use crate::session::{self, DetectionSession};
use crate::view::{self, ZoomDirection};

pub struct DetectionApp {
    session: DetectionSession,
    detector: Arc<MultiThresholdDetector<YoloDetector>>,
    persister: ResultPersister,
    status: String,
    canvas: Option<Handle>,
    modifiers: keyboard::Modifiers,
}

impl DetectionApp {
    pub fn new(config: &AppConfig, detector: Arc<MultiThresholdDetector<YoloDetector>>) -> Self {
        let persister = ResultPersister::new(&config.output_dir)
            .with_font(LabelFont::discover(config.label_font.as_deref()));

        Self {
            session: DetectionSession::new(config.viewport),
            detector,
            persister,
            status: session::WELCOME_STATUS.to_string(),
            canvas: None,
            modifiers: keyboard::Modifiers::default(),
        }
    }

    pub fn title(&self) -> String {
        "Door/Window Detection Tool".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseImage => Task::perform(
                AsyncFileDialog::new()
                    .add_filter("Image files", &["jpg", "jpeg", "png"])
                    .pick_file(),
                |handle| Message::ImageSelected(handle.map(|h| h.path().to_path_buf())),
            ),
            Message::ImageSelected(None) => Task::none(),
            Message::ImageSelected(Some(path)) => {
                // Inference blocks the window until all passes finish
                let result = self.session.load_image(&path, self.detector.as_ref());
                self.status = session::status_line(&result, |loaded| session::loaded_status(loaded));
                if result.is_ok() {
                    self.render();
                }
                Task::none()
            }
            Message::Zoom(direction) => {
                self.apply_zoom(direction);
                Task::none()
            }
            Message::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
                Task::none()
            }
            Message::WheelScrolled(delta) => {
                let dy = match delta {
                    mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => y,
                };
                if self.modifiers.control()
                    && let Some(direction) = view::wheel_zoom(dy)
                {
                    self.apply_zoom(direction);
                }
                Task::none()
            }
            Message::SaveResults => {
                let result = self.session.save(&self.persister);
                self.status = session::status_line(&result, session::save_status);
                Task::none()
            }
        }
    }

    /// Ctrl+wheel zooms the canvas; plain scrolling is left to the scrollable.
    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                Some(Message::ModifiersChanged(modifiers))
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                Some(Message::WheelScrolled(delta))
            }
            _ => None,
        })
    }

    fn apply_zoom(&mut self, direction: ZoomDirection) {
        if self.session.loaded().is_some() {
            self.session.zoom(direction);
            self.render();
        }
    }

    fn render(&mut self) {
        self.canvas = self.session.loaded().map(|loaded| {
            let rgba = annotate::render_display(
                &loaded.image,
                self.session.boxes(),
                self.session.scale(),
                self.persister.font(),
            );
            let (width, height) = rgba.dimensions();
            Handle::from_rgba(width, height, rgba.into_raw())
        });
    }

    pub fn view(&self) -> Element<'_, Message> {
        let has_image = self.session.loaded().is_some();

        let sidebar = column![
            text("Door/Window Detection").size(18),
            section(
                "1. Upload House Image",
                action_button("Browse...", Some(Message::BrowseImage)),
            ),
            section(
                "View",
                column![
                    action_button("Zoom in", has_image.then_some(Message::Zoom(ZoomDirection::In))),
                    action_button("Zoom out", has_image.then_some(Message::Zoom(ZoomDirection::Out))),
                ]
                .spacing(6),
            ),
            section(
                "Settings",
                action_button("Save Results", Some(Message::SaveResults)),
            ),
        ]
        .spacing(15);

        let canvas: Element<'_, Message> = match &self.canvas {
            Some(handle) => scrollable::Scrollable::new(Image::new(handle.clone()))
                .direction(scrollable::Direction::Both {
                    vertical: Scrollbar::default(),
                    horizontal: Scrollbar::default(),
                })
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => container(text("No image loaded"))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        layout(sidebar, canvas, &self.status)
    }
}

/// Open the detection window. The detector is loaded by the caller so a
/// missing model aborts before any window appears.
pub fn run(config: AppConfig, detector: MultiThresholdDetector<YoloDetector>) -> anyhow::Result<()> {
    let detector = Arc::new(detector);

    iced::application(
        move || DetectionApp::new(&config, detector.clone()),
        DetectionApp::update,
        DetectionApp::view,
    )
    .title(DetectionApp::title)
    .subscription(DetectionApp::subscription)
    .window_size(iced::Size::new(1000.0, 700.0))
    .run()
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
