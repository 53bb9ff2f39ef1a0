#[cfg(test)]
mod tests {
    use super::super::Component;
    use super::super::filter_form::*;
    use crate::interactive::ui::events::Message;
    use crate::query::{ExitFilter, SearchQuery, SortKey};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        }
    }

    #[test]
    fn test_enter_submits_search() {
        let mut form = FilterForm::new();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), Some(Message::SubmitSearch));
    }

    #[test]
    fn test_arrow_navigation_moves_focus() {
        let mut form = FilterForm::new();
        assert_eq!(form.focused_field(), 0);

        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Down));
        assert_eq!(form.focused_field(), 2);

        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.focused_field(), 1);

        // Clamped at the edges
        form.handle_key(key(KeyCode::Up));
        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.focused_field(), 0);
    }

    #[test]
    fn test_cycling_exit_filter_reports_new_query() {
        let mut form = FilterForm::new();
        form.set_query(SearchQuery::default());

        let msg = form.handle_key(key(KeyCode::Right));
        match msg {
            Some(Message::QueryChanged(q)) => {
                assert_eq!(q.exit_filter, ExitFilter::FastExits);
            }
            other => panic!("unexpected message: {other:?}"),
        }

        // Cycling left from the default wraps around
        form.set_query(SearchQuery::default());
        let msg = form.handle_key(key(KeyCode::Left));
        match msg {
            Some(Message::QueryChanged(q)) => {
                assert_eq!(q.exit_filter, ExitFilter::GuardsOnly);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_direction_toggle() {
        let mut form = FilterForm::new();
        form.set_query(SearchQuery::default());
        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Down)); // direction row

        let msg = form.handle_key(key(KeyCode::Char(' ')));
        match msg {
            Some(Message::QueryChanged(q)) => assert!(!q.sort_reverse),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_country_typing_and_clearing() {
        let mut form = FilterForm::new();
        form.set_query(SearchQuery::default());
        for _ in 0..4 {
            form.handle_key(key(KeyCode::Down));
        }

        form.handle_key(key(KeyCode::Char('D')));
        let msg = form.handle_key(key(KeyCode::Char('e')));
        match msg {
            Some(Message::QueryChanged(q)) => {
                assert_eq!(q.country.as_deref(), Some("de"));
            }
            other => panic!("unexpected message: {other:?}"),
        }

        form.handle_key(key(KeyCode::Backspace));
        let msg = form.handle_key(key(KeyCode::Backspace));
        match msg {
            Some(Message::QueryChanged(q)) => assert_eq!(q.country, None),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_top_digits_accumulate() {
        let mut form = FilterForm::new();
        form.set_query(SearchQuery::default());
        for _ in 0..5 {
            form.handle_key(key(KeyCode::Down));
        }

        form.handle_key(key(KeyCode::Char('2')));
        let msg = form.handle_key(key(KeyCode::Char('5')));
        match msg {
            Some(Message::QueryChanged(q)) => assert_eq!(q.top, Some(25)),
            other => panic!("unexpected message: {other:?}"),
        }

        form.handle_key(key(KeyCode::Backspace));
        let msg = form.handle_key(key(KeyCode::Backspace));
        match msg {
            Some(Message::QueryChanged(q)) => assert_eq!(q.top, None),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_sort_cycle_covers_all_keys() {
        let mut form = FilterForm::new();
        form.set_query(SearchQuery::default());
        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Down)); // sort row

        let mut seen = vec![SearchQuery::default().sort];
        for _ in 0..SortKey::all().len() - 1 {
            if let Some(Message::QueryChanged(q)) = form.handle_key(key(KeyCode::Right)) {
                seen.push(q.sort);
                form.set_query(q);
            }
        }
        for key in SortKey::all() {
            assert!(seen.contains(key), "missing sort key {key:?}");
        }
    }
}
