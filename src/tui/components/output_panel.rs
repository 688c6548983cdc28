//! # Output Panel Component
//!
//! Shows the latest outcome string (the text the action writes) above a
//! newest-first history of completed actions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::core::state::HistoryEntry;
use crate::tui::component::Component;

pub struct OutputPanel<'a> {
    pub output: &'a str,
    pub failed: bool,
    pub history: &'a [HistoryEntry],
}

fn outcome_color(failed: bool) -> Color {
    if failed { Color::Red } else { Color::Green }
}

impl Component for OutputPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [output_area, history_area] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(area);

        let output = Paragraph::new(self.output)
            .style(Style::default().fg(outcome_color(self.failed)))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Output "));
        frame.render_widget(output, output_area);

        let items: Vec<ListItem> = self
            .history
            .iter()
            .rev()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.at.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!("{}: ", entry.label)),
                    Span::styled(entry.text.clone(), Style::default().fg(outcome_color(entry.failed))),
                ]))
            })
            .collect();

        let history = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" History "),
        );
        frame.render_widget(history, history_area);
    }
}
