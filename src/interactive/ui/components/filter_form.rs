use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crate::query::{ExitFilter, SearchQuery, SortKey};
use crate::schemas::Country;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const FIELD_COUNT: usize = 6;

const FIELD_EXIT_FILTER: usize = 0;
const FIELD_LINKS: usize = 1;
const FIELD_SORT: usize = 2;
const FIELD_DIRECTION: usize = 3;
const FIELD_COUNTRY: usize = 4;
const FIELD_TOP: usize = 5;

/// The search form. Edits are reported wholesale as
/// [`Message::QueryChanged`]; the controller's query stays the source of
/// truth and is echoed back in through [`FilterForm::set_query`] each frame.
#[derive(Default)]
pub struct FilterForm {
    query: SearchQuery,
    countries: Vec<Country>,
    focused: usize,
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: SearchQuery) {
        self.query = query;
    }

    pub fn set_countries(&mut self, countries: Vec<Country>) {
        self.countries = countries;
    }

    pub fn focused_field(&self) -> usize {
        self.focused
    }

    fn country_label(&self) -> String {
        match &self.query.country {
            None => "any".to_string(),
            Some(code) => {
                let name = self
                    .countries
                    .iter()
                    .find(|c| c.cc == *code)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                format!("{code} ({name})")
            }
        }
    }

    fn cycle<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> T {
        let pos = items.iter().position(|i| *i == current).unwrap_or(0);
        let next = if forward {
            (pos + 1) % items.len()
        } else {
            (pos + items.len() - 1) % items.len()
        };
        items[next]
    }

    fn edit(&mut self, key: KeyEvent) -> bool {
        let forward = key.code != KeyCode::Left;
        match (self.focused, key.code) {
            (FIELD_EXIT_FILTER, KeyCode::Left | KeyCode::Right) => {
                self.query.exit_filter =
                    Self::cycle(ExitFilter::all(), self.query.exit_filter, forward);
                true
            }
            (FIELD_LINKS, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                self.query.links = !self.query.links;
                true
            }
            (FIELD_SORT, KeyCode::Left | KeyCode::Right) => {
                self.query.sort = Self::cycle(SortKey::all(), self.query.sort, forward);
                true
            }
            (FIELD_DIRECTION, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                self.query.sort_reverse = !self.query.sort_reverse;
                true
            }
            (FIELD_COUNTRY, KeyCode::Char(c)) if c.is_ascii_alphabetic() => {
                let mut code = self.query.country.take().unwrap_or_default();
                code.push(c.to_ascii_lowercase());
                self.query.country = Some(code);
                true
            }
            (FIELD_COUNTRY, KeyCode::Backspace) => {
                if let Some(mut code) = self.query.country.take() {
                    code.pop();
                    if !code.is_empty() {
                        self.query.country = Some(code);
                    }
                }
                true
            }
            (FIELD_TOP, KeyCode::Char(d)) if d.is_ascii_digit() => {
                let digit = u32::from(d as u8 - b'0');
                let top = self.query.top.unwrap_or(0).saturating_mul(10) + digit;
                self.query.top = Some(top.min(999));
                true
            }
            (FIELD_TOP, KeyCode::Backspace) => {
                self.query.top = match self.query.top.map(|t| t / 10) {
                    Some(0) | None => None,
                    Some(t) => Some(t),
                };
                true
            }
            _ => false,
        }
    }
}

impl Component for FilterForm {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let rows: [(&str, String); FIELD_COUNT] = [
            ("Relays", self.query.exit_filter.label().to_string()),
            ("Links", if self.query.links { "on" } else { "off" }.to_string()),
            ("Sort by", self.query.sort.as_str().to_string()),
            (
                "Direction",
                if self.query.sort_reverse {
                    "descending"
                } else {
                    "ascending"
                }
                .to_string(),
            ),
            ("Country", self.country_label()),
            (
                "Top",
                self.query
                    .top
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "service default".to_string()),
            ),
        ];

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                let style = if i == self.focused {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{label:<10}"), style),
                    Span::raw(" "),
                    Span::styled(value.clone(), style),
                ])
            })
            .collect();

        let block = Block::default()
            .title("Search filters (Enter: search, d: donate)")
            .borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up => {
                self.focused = self.focused.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.focused = (self.focused + 1).min(FIELD_COUNT - 1);
                None
            }
            KeyCode::Enter => Some(Message::SubmitSearch),
            _ => {
                if self.edit(key) {
                    Some(Message::QueryChanged(self.query.clone()))
                } else {
                    None
                }
            }
        }
    }
}
