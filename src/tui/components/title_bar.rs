//! # TitleBar Component
//!
//! Top status bar showing the active mode and what is running.
//!
//! ## Conditional Formatting
//!
//! 1. **Running**: `"IoT Controller (mode: Real Backend) | Mode: Real Backend | Running: Light On"`
//! 2. **Status message**: `"IoT Controller (mode: Simulated) | Mode: Simulated"`
//! 3. **Default**: `"IoT Controller (mode: Simulated)"`
//!
//! In `RealBackend` mode the backend address is appended to the mode, since
//! that is the one mode where it matters.

use crate::Mode;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component. All fields are props.
pub struct TitleBar {
    pub mode: Mode,
    pub base_url: String,
    pub status_message: String,
    /// Label of the action in flight, if any
    pub running: Option<String>,
}

impl TitleBar {
    pub fn new(mode: Mode, base_url: String, status_message: String, running: Option<String>) -> Self {
        Self {
            mode,
            base_url,
            status_message,
            running,
        }
    }

    fn mode_text(&self) -> String {
        match self.mode {
            Mode::RealBackend => format!("{} @ {}", self.mode.label(), self.base_url),
            Mode::Simulated | Mode::DummyRemote => self.mode.label().to_string(),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mode = self.mode_text();
        let title_text = match (&self.running, self.status_message.is_empty()) {
            (Some(label), _) => format!(
                "IoT Controller (mode: {}) | {} | Running: {}",
                mode, self.status_message, label
            ),
            (None, true) => format!("IoT Controller (mode: {})", mode),
            (None, false) => format!("IoT Controller (mode: {}) | {}", mode, self.status_message),
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
