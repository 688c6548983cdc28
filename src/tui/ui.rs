use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ActionList, OutputPanel, TitleBar};

const ACTION_LIST_WIDTH: u16 = 30;
const HELP_TEXT: &str = " ↑/↓ Select  Enter Run  m Mode  q Quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [list_area, output_area] =
        Layout::horizontal([Length(ACTION_LIST_WIDTH), Min(0)]).areas(main_area);

    TitleBar::new(
        app.mode,
        app.base_url.clone(),
        app.status_message.clone(),
        app.running_label().map(str::to_string),
    )
    .render(frame, title_area);

    ActionList {
        actions: &app.actions,
        selected: app.selected,
        running: app.running_label(),
        list_state: &mut tui.list_state,
    }
    .render(frame, list_area);

    OutputPanel {
        output: &app.output,
        failed: app.output_failed,
        history: &app.history,
    }
    .render(frame, output_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_full_layout_renders() {
        let app = test_app();
        let mut tui = TuiState::new();
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("IoT Controller (mode: Simulated)"));
        assert!(text.contains("Get Temperature"));
        assert!(text.contains("Press Enter to run an action."));
        assert!(text.contains("Enter Run"));
    }
}
