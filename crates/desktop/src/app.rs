use std::sync::Mutex;
use std::time::Duration;

use iced::widget::{column, container, text, Space};
use iced::{Color, Element, Length, Subscription, Task, Theme};

use facewatch_core::detection::domain::detection_state::DetectionState;
use facewatch_core::viewer::face_viewer::ViewerScreen;

use crate::session::Session;
use crate::theme;
use crate::widgets::{face_overlay, toggle_button};

/// How often the replayed camera channel is drained while detection runs.
const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// How long to wait for in-flight forwards when the window closes.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    Mount,
    ToggleDetection,
    PollFrames,
    CloseRequested,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    session: Option<Session>,
}

impl App {
    pub fn new(slot: &Mutex<Option<Session>>) -> (Self, Task<Message>) {
        let session = slot.lock().ok().and_then(|mut s| s.take());
        if session.is_none() {
            log::error!("Viewer session was already taken");
        }
        // Mount after the first frame so the pending screen is shown while
        // the permission prompt is outstanding.
        (Self { session }, Task::done(Message::Mount))
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Mount => {
                if let Some(session) = self.session.as_mut() {
                    let state = session.viewer.mount();
                    log::info!("Camera authorization: {state:?}");
                }
            }
            Message::ToggleDetection => {
                if let Some(session) = self.session.as_mut() {
                    match session.viewer.toggle() {
                        Ok(state) => log::info!("Detection {state}"),
                        Err(e) => log::warn!("{e}"),
                    }
                }
            }
            Message::PollFrames => {
                if let Some(session) = self.session.as_mut() {
                    let batches: Vec<_> = session.events.try_iter().collect();
                    for batch in batches {
                        session.viewer.on_faces_detected(batch);
                    }
                }
            }
            Message::CloseRequested => {
                if let Some(session) = self.session.take() {
                    session.viewer.unmount(SHUTDOWN_GRACE);
                }
                return iced::exit();
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let Some(session) = &self.session else {
            return centered(text("Viewer unavailable"));
        };

        match session.viewer.view() {
            ViewerScreen::Pending => container(Space::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            ViewerScreen::NoAccess { message } => centered(text(message)),
            ViewerScreen::Live {
                toggle_label,
                state,
                overlay,
            } => {
                let preview = container(face_overlay::view(overlay.as_ref()))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(|_| container::Style {
                        background: Some(Color::BLACK.into()),
                        ..container::Style::default()
                    });

                let controls = container(toggle_button::view(
                    toggle_label,
                    state == DetectionState::Active,
                    Message::ToggleDetection,
                ))
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding([16, 0]);

                column![preview, controls].height(Length::Fill).into()
            }
        }
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let close = iced::window::close_requests().map(|_| Message::CloseRequested);
        let active = self
            .session
            .as_ref()
            .is_some_and(|s| s.viewer.detection_state().is_active());
        if active {
            Subscription::batch([
                close,
                iced::time::every(FRAME_POLL_INTERVAL).map(|_| Message::PollFrames),
            ])
        } else {
            close
        }
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
