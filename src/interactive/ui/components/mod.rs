pub mod filter_form;
pub mod help_dialog;
pub mod payment_dialog;
pub mod relay_list;

#[cfg(test)]
mod filter_form_test;
#[cfg(test)]
mod relay_list_test;

use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

pub trait Component {
    fn render(&mut self, f: &mut Frame, area: Rect);
    fn handle_key(&mut self, key: KeyEvent) -> Option<Message>;
}
