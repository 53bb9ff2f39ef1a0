use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use super::*;
use crate::controller::{ApiEvent, ApiOp, ApiRequest, Gateway, SearchController, UiStatus};
use crate::interactive::ui::events::Message;
use crate::interactive::ui::view_state::{Focus, TuiPresenter};
use crate::query::{SearchQuery, SortKey};
use crate::schemas::{PaymentData, PaymentResponse, Relay, RelaySet};

type RequestLog = Rc<RefCell<Vec<(ApiRequest, Sender<ApiEvent>)>>>;

struct MockGateway {
    log: RequestLog,
}

impl Gateway for MockGateway {
    fn fetch(&mut self, request: ApiRequest, reply: Sender<ApiEvent>) {
        self.log.borrow_mut().push((request, reply));
    }
}

fn app() -> (InteractiveApp, RequestLog) {
    let log: RequestLog = Rc::new(RefCell::new(Vec::new()));
    let (presenter, effects_rx) = TuiPresenter::channel();
    let controller = SearchController::new(
        "http://127.0.0.1:5000",
        Box::new(MockGateway { log: log.clone() }),
        Box::new(presenter),
    );
    (InteractiveApp::with_controller(controller, effects_rx), log)
}

fn relay_set(count: usize) -> RelaySet {
    RelaySet {
        relays_published: "now".to_string(),
        results: (0..count)
            .map(|i| Relay {
                nick: format!("relay{i}"),
                ..Relay::default()
            })
            .collect(),
        excluded: None,
        total: None,
    }
}

#[test]
fn test_submit_search_dispatches_one_request() {
    let (mut app, log) = app();

    app.handle_message(Message::SubmitSearch);

    assert_eq!(app.controller.status(), UiStatus::Loading);
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert!(matches!(log[0].0.op, ApiOp::Search(_)));
}

#[test]
fn test_sort_by_same_column_flips_direction() {
    let (mut app, log) = app();

    // Default sort is cw, descending; re-sorting by cw flips it
    app.handle_message(Message::SortBy(SortKey::Cw));
    {
        let log = log.borrow();
        match &log[0].0.op {
            ApiOp::Search(query) => assert!(!query.sort_reverse),
            other => panic!("unexpected op: {other:?}"),
        }
    }

    // A different column starts descending again
    app.handle_message(Message::SortBy(SortKey::Nick));
    {
        let log = log.borrow();
        match &log[1].0.op {
            ApiOp::Search(query) => {
                assert_eq!(query.sort, SortKey::Nick);
                assert!(query.sort_reverse);
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }
}

#[test]
fn test_successful_search_moves_focus_to_results() {
    let (mut app, log) = app();

    app.handle_message(Message::SubmitSearch);
    {
        let log = log.borrow();
        let (request, reply) = &log[0];
        reply
            .send(ApiEvent::SearchDone {
                id: request.id,
                result: Ok(relay_set(3)),
            })
            .unwrap();
    }
    app.drain_background();

    assert_eq!(app.controller.status(), UiStatus::Loaded);
    assert_eq!(app.view.focus, Focus::Results);
    assert_eq!(app.view.selected_relay, 0);
}

#[test]
fn test_donate_flow_opens_dialog_on_completion() {
    let (mut app, log) = app();

    app.handle_message(Message::OpenDonate);
    assert!(!app.view.dialog_open);
    {
        let log = log.borrow();
        let (request, reply) = &log[0];
        assert!(matches!(request.op, ApiOp::Payment(_)));
        reply
            .send(ApiEvent::PaymentDone {
                id: request.id,
                result: Ok(PaymentResponse {
                    status: Some("success".to_string()),
                    data: Some(PaymentData {
                        message: String::new(),
                        bitcoin_address: Some("1BoatSLRHtKNngkdXEeobR76b53LETtpyT".to_string()),
                    }),
                }),
            })
            .unwrap();
    }
    app.drain_background();

    assert!(app.view.dialog_open);
    assert_eq!(
        app.controller.payment_address(),
        "1BoatSLRHtKNngkdXEeobR76b53LETtpyT"
    );
}

#[test]
fn test_check_flow_uses_typed_address() {
    let (mut app, log) = app();

    app.handle_message(Message::CheckInputChanged(
        "1BoatSLRHtKNngkdXEeobR76b53LETtpyT".to_string(),
    ));
    app.handle_message(Message::SubmitCheck);

    let log = log.borrow();
    match &log[0].0.op {
        ApiOp::Forward(address) => {
            assert_eq!(address, "1BoatSLRHtKNngkdXEeobR76b53LETtpyT");
        }
        other => panic!("unexpected op: {other:?}"),
    }
}

#[test]
fn test_query_edits_reach_the_controller() {
    let (mut app, _) = app();

    let edited = SearchQuery {
        country: Some("se".to_string()),
        ..SearchQuery::default()
    };
    app.handle_message(Message::QueryChanged(edited.clone()));

    assert_eq!(app.controller.query(), &edited);
}

#[test]
fn test_selection_moves_within_results() {
    let (mut app, log) = app();

    app.handle_message(Message::SubmitSearch);
    {
        let log = log.borrow();
        let (request, reply) = &log[0];
        reply
            .send(ApiEvent::SearchDone {
                id: request.id,
                result: Ok(relay_set(2)),
            })
            .unwrap();
    }
    app.drain_background();

    app.handle_message(Message::SelectDown);
    assert_eq!(app.view.selected_relay, 1);
    // Clamped at the end
    app.handle_message(Message::SelectDown);
    assert_eq!(app.view.selected_relay, 1);
    app.handle_message(Message::SelectUp);
    assert_eq!(app.view.selected_relay, 0);
}

#[test]
fn test_help_and_dialog_toggles() {
    let (mut app, _) = app();

    app.handle_message(Message::ShowHelp);
    assert!(app.view.help_open);
    app.handle_message(Message::CloseHelp);
    assert!(!app.view.help_open);

    app.view.dialog_open = true;
    app.handle_message(Message::CloseDialog);
    assert!(!app.view.dialog_open);
}

#[test]
fn test_focus_switching() {
    let (mut app, _) = app();

    assert_eq!(app.view.focus, Focus::Form);
    app.handle_message(Message::FocusResults);
    assert_eq!(app.view.focus, Focus::Results);
    app.handle_message(Message::FocusForm);
    assert_eq!(app.view.focus, Focus::Form);
}
