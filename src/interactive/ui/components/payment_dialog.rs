use crate::controller::{Banner, BannerKind};
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// The donation dialog: shows the minted forwarding address and hosts the
/// transaction-check input plus its banner area.
#[derive(Default)]
pub struct PaymentDialog {
    address: String,
    input: String,
    banner: Option<Banner>,
}

impl PaymentDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_address(&mut self, address: String) {
        self.address = address;
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub fn set_banner(&mut self, banner: Option<Banner>) {
        self.banner = banner;
    }
}

impl Component for PaymentDialog {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        f.render_widget(Clear, area);

        let mut lines = Vec::new();
        if self.address.is_empty() {
            lines.push(Line::from(Span::styled(
                "No relay in the current selection accepts donations.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from("Send your donation to this forwarding address:"));
            lines.push(Line::from(Span::styled(
                self.address.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "It forwards to the selected relay operators, split by consensus weight.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Check a sent transaction: "),
            Span::styled(
                format!("{}_", self.input),
                Style::default().fg(Color::Yellow),
            ),
        ]));

        if let Some(banner) = &self.banner {
            let style = match banner.kind {
                BannerKind::Success => Style::default().fg(Color::Green),
                BannerKind::Warning => Style::default().fg(Color::Red),
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(banner.text.clone(), style)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter: check transaction   Del: dismiss notice   Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default().title("Donate").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::CloseDialog),
            KeyCode::Enter => Some(Message::SubmitCheck),
            KeyCode::Delete => Some(Message::DismissBanner),
            KeyCode::Backspace => {
                self.input.pop();
                Some(Message::CheckInputChanged(self.input.clone()))
            }
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                self.input.push(c);
                Some(Message::CheckInputChanged(self.input.clone()))
            }
            _ => None,
        }
    }
}
