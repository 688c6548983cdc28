//! # Action List Component
//!
//! The panel's buttons. One row per action; the highlighted row is what
//! Enter runs. The running action is marked with `…`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListState` lives in `TuiState`
//! - `ActionList` is created each frame with borrowed props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::core::action::{Action, Verb};
use crate::tui::component::Component;

pub struct ActionList<'a> {
    pub actions: &'a [Action],
    pub selected: usize,
    pub running: Option<&'a str>,
    pub list_state: &'a mut ListState,
}

impl Component for ActionList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let verb_style = match action.verb {
                    Verb::Get => style.fg(Color::Cyan),
                    Verb::Post => style.fg(Color::Yellow),
                };
                let marker = if self.running == Some(action.label.as_str()) {
                    " …"
                } else {
                    ""
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<4} ", action.verb), verb_style),
                    Span::styled(format!("{}{}", action.label, marker), style),
                ]))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Actions ");

        self.list_state.select(Some(self.selected));
        frame.render_stateful_widget(List::new(items).block(block), area, self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::catalogue;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_renders_every_label_and_marks_running() {
        let actions = catalogue("http://x");
        let mut list_state = ListState::default();
        let backend = TestBackend::new(40, 14);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                ActionList {
                    actions: &actions,
                    selected: 2,
                    running: Some("Light On"),
                    list_state: &mut list_state,
                }
                .render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("Actions"));
        assert!(text.contains("Get Temperature"));
        assert!(text.contains("Send Command"));
        assert!(text.contains("Light On …"));
        assert_eq!(list_state.selected(), Some(2));
    }
}
