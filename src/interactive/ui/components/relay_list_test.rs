#[cfg(test)]
mod tests {
    use super::super::Component;
    use super::super::relay_list::*;
    use crate::interactive::ui::events::Message;
    use crate::query::SortKey;
    use crate::schemas::Relay;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        }
    }

    fn relays(n: usize) -> Vec<Relay> {
        (0..n)
            .map(|i| Relay {
                nick: format!("relay{i}"),
                ..Relay::default()
            })
            .collect()
    }

    #[test]
    fn test_arrows_become_selection_messages() {
        let mut list = RelayList::new();
        list.set_relays(relays(3));

        assert_eq!(list.handle_key(key(KeyCode::Up)), Some(Message::SelectUp));
        assert_eq!(
            list.handle_key(key(KeyCode::Down)),
            Some(Message::SelectDown)
        );
    }

    #[test]
    fn test_d_opens_donation_flow() {
        let mut list = RelayList::new();
        assert_eq!(
            list.handle_key(key(KeyCode::Char('d'))),
            Some(Message::OpenDonate)
        );
    }

    #[test]
    fn test_number_keys_map_to_sort_columns() {
        let mut list = RelayList::new();
        assert_eq!(
            list.handle_key(key(KeyCode::Char('1'))),
            Some(Message::SortBy(SortKey::Cw))
        );
        assert_eq!(
            list.handle_key(key(KeyCode::Char('5'))),
            Some(Message::SortBy(SortKey::PExit))
        );
        assert_eq!(
            list.handle_key(key(KeyCode::Char('7'))),
            Some(Message::SortBy(SortKey::Cc))
        );
    }

    #[test]
    fn test_selection_is_clamped_to_results() {
        let mut list = RelayList::new();
        list.set_relays(relays(2));
        list.set_selected(10);
        assert_eq!(list.selected_relay().unwrap().nick, "relay1");

        // Shrinking the result set pulls the selection back in range
        list.set_selected(1);
        list.set_relays(relays(1));
        assert_eq!(list.selected_relay().unwrap().nick, "relay0");
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let mut list = RelayList::new();
        list.set_relays(Vec::new());
        assert!(list.selected_relay().is_none());
    }
}
