use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct HelpDialog;

impl HelpDialog {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HelpDialog {
    fn default() -> Self {
        Self::new()
    }
}

const BINDINGS: &[(&str, &str)] = &[
    ("Tab", "switch between form and results"),
    ("Up/Down", "move through form fields / relay rows"),
    ("Left/Right", "change the focused form field"),
    ("Enter", "run the search (form focus)"),
    ("1-7", "sort by column; same column flips direction"),
    ("d", "request a donation address for the selection"),
    ("Esc", "close the open dialog"),
    ("?", "this help"),
    ("Ctrl+C twice", "quit"),
];

impl Component for HelpDialog {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        f.render_widget(Clear, area);

        let mut lines = vec![Line::from(Span::styled(
            "Key bindings",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        lines.push(Line::from(""));
        for (keys, what) in BINDINGS {
            lines.push(Line::from(vec![
                Span::styled(format!("{keys:<14}"), Style::default().fg(Color::Yellow)),
                Span::raw(*what),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default().title("Help").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Option<Message> {
        Some(Message::CloseHelp)
    }
}
