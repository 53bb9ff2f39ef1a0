use crate::controller::UiStatus;
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crate::query::SortKey;
use crate::schemas::Relay;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// The relay result table. Selection lives in the view state and is echoed
/// in through [`RelayList::set_selected`].
#[derive(Default)]
pub struct RelayList {
    relays: Vec<Relay>,
    status: Option<UiStatus>,
    selected: usize,
    scroll_offset: usize,
}

impl RelayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_relays(&mut self, relays: Vec<Relay>) {
        if self.selected >= relays.len() {
            self.selected = relays.len().saturating_sub(1);
        }
        self.relays = relays;
    }

    pub fn set_status(&mut self, status: UiStatus) {
        self.status = Some(status);
    }

    pub fn set_selected(&mut self, selected: usize) {
        self.selected = selected.min(self.relays.len().saturating_sub(1));
    }

    pub fn selected_relay(&self) -> Option<&Relay> {
        self.relays.get(self.selected)
    }

    fn placeholder(&self) -> Option<&'static str> {
        match self.status {
            None | Some(UiStatus::Hidden) => Some("Fill in the form and press Enter to search."),
            Some(UiStatus::Loading) => Some("[searching...]"),
            Some(UiStatus::ResultEmpty) => Some("No relays matched your criteria."),
            _ if self.relays.is_empty() => Some("No relays matched your criteria."),
            _ => None,
        }
    }

    fn row_line(relay: &Relay, selected: bool) -> Line<'_> {
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let pct = |v: Option<f64>| v.map(|v| format!("{v:.3}%")).unwrap_or_else(|| "-".into());

        Line::from(Span::styled(
            format!(
                "{:>3}  {:<18} {:>9} {:>9} {:>8} {:>8}  {:^4} {:^5}  {:>2}  {}",
                relay.index.map(|i| i.to_string()).unwrap_or_default(),
                relay.nick,
                pct(relay.cw),
                pct(relay.adv_bw),
                pct(relay.p_exit),
                format!("{:.2}%", relay.donation_share),
                if relay.exit.is_set() { "exit" } else { "" },
                if relay.guard.is_set() { "guard" } else { "" },
                relay.cc,
                relay.as_info,
            ),
            style,
        ))
    }
}

impl Component for RelayList {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Relays (1-7: sort columns, d: donate to selection)")
            .borders(Borders::ALL);

        if let Some(text) = self.placeholder() {
            let para = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(para, area);
            return;
        }

        let visible = area.height.saturating_sub(3) as usize;
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if visible > 0 && self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected + 1 - visible;
        }

        let mut lines = vec![Line::from(Span::styled(
            format!(
                "{:>3}  {:<18} {:>9} {:>9} {:>8} {:>8}  {:^4} {:^5}  {:>2}  {}",
                "#", "nickname", "cw", "adv_bw", "p_exit", "share", "exit", "guard", "cc", "AS",
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        lines.extend(
            self.relays
                .iter()
                .enumerate()
                .skip(self.scroll_offset)
                .take(visible)
                .map(|(i, relay)| Self::row_line(relay, i == self.selected)),
        );

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up => Some(Message::SelectUp),
            KeyCode::Down => Some(Message::SelectDown),
            KeyCode::Char('d') => Some(Message::OpenDonate),
            KeyCode::Char(c @ '1'..='7') => {
                let index = (c as u8 - b'1') as usize;
                SortKey::all().get(index).map(|key| Message::SortBy(*key))
            }
            _ => None,
        }
    }
}
