//! The search controller: owns the query record, the UI status flag and the
//! fetched payloads, mirrors the query into the navigable address, and talks
//! to the service through a [`Gateway`].
//!
//! The view never gets poked directly. Anything screen-shaped goes through
//! the [`Presenter`] seam, and state changes are announced on subscription
//! channels handed out by [`SearchController::subscribe`].

use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::mpsc::{self, Receiver, Sender};

use regex::Regex;
use tracing::{debug, warn};

use crate::query::{SearchQuery, SortKey};
use crate::schemas::{Country, RelaySet};

pub mod banner;
pub mod gateway;
pub mod location;


pub use banner::{Banner, BannerKind, forward_failure_text};
pub use gateway::{ApiEvent, ApiOp, ApiRequest, Gateway, HttpGateway};
pub use location::Location;

/// Coarse state flag the view renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiStatus {
    Hidden,
    Loading,
    Loaded,
    ResultEmpty,
    Warn,
    Success,
}

/// What changed, for subscribers that want to re-render selectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Query,
    Status,
    Results,
    Payment,
    Countries,
}

/// Screen-shaped side effects, implemented by the active front end.
pub trait Presenter {
    /// Bring the results region into view after a successful search.
    fn present_results(&mut self);
    /// Open the payment dialog (shown whether or not an address arrived).
    fn present_payment_dialog(&mut self);
    /// Drop any banner currently shown in the payment area.
    fn clear_payment_banners(&mut self);
    /// Show a banner in the payment area, replacing the current one.
    fn show_banner(&mut self, banner: Banner);
}

pub type SuccessHook = Box<dyn FnOnce()>;

/// Shape check mirroring the service's own address extraction pattern.
pub fn is_bitcoin_address(address: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[13][a-km-zA-HJ-NP-Z0-9]{26,33}$").expect("valid pattern"))
        .is_match(address)
}

pub struct SearchController {
    query: SearchQuery,
    status: UiStatus,
    data: Option<RelaySet>,
    last_refreshed: String,
    payment_address: String,
    countries: Vec<Country>,
    location: Location,
    gateway: Box<dyn Gateway>,
    presenter: Box<dyn Presenter>,
    events_tx: Sender<ApiEvent>,
    events_rx: Receiver<ApiEvent>,
    subscribers: Vec<Sender<Change>>,
    hooks: HashMap<u64, SuccessHook>,
    next_request_id: u64,
}

impl SearchController {
    pub fn new(
        base_url: &str,
        gateway: Box<dyn Gateway>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            query: SearchQuery::default(),
            status: UiStatus::Hidden,
            data: None,
            last_refreshed: "-".to_string(),
            payment_address: String::new(),
            countries: Vec::new(),
            location: Location::new(base_url),
            gateway,
            presenter,
            events_tx,
            events_rx,
            subscribers: Vec::new(),
            hooks: HashMap::new(),
            next_request_id: 0,
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn status(&self) -> UiStatus {
        self.status
    }

    pub fn data(&self) -> Option<&RelaySet> {
        self.data.as_ref()
    }

    pub fn last_refreshed(&self) -> &str {
        &self.last_refreshed
    }

    pub fn payment_address(&self) -> &str {
        &self.payment_address
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// A link that reproduces the current search when opened.
    pub fn share_link(&self) -> String {
        self.location.share_link(&self.query)
    }

    /// Register a change listener. Dead receivers are pruned on emit.
    pub fn subscribe(&mut self) -> Receiver<Change> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Edit the query in place (form bindings go through here so listeners
    /// hear about it).
    pub fn update_query(&mut self, edit: impl FnOnce(&mut SearchQuery)) {
        edit(&mut self.query);
        self.emit(Change::Query);
    }

    /// Fetch the static country reference data. Called once at startup; no
    /// retry and no further lifecycle.
    pub fn bootstrap(&mut self) {
        let id = self.next_id();
        self.dispatch(ApiRequest {
            id,
            op: ApiOp::Countries,
        });
    }

    /// Run a search for the current query, optionally merging a sort
    /// override first. The query is mirrored into the address before the
    /// request goes out, so the address always matches the last-issued
    /// search.
    pub fn run_search(
        &mut self,
        sort_override: Option<(SortKey, bool)>,
        on_success: Option<SuccessHook>,
    ) {
        if let Some((sort, reverse)) = sort_override {
            self.query.sort = sort;
            self.query.sort_reverse = reverse;
            self.emit(Change::Query);
        }

        self.set_status(UiStatus::Loading);
        self.location.set_query(&self.query);

        let id = self.next_id();
        if let Some(hook) = on_success {
            self.hooks.insert(id, hook);
        }
        let op = ApiOp::Search(self.query.clone());
        self.dispatch(ApiRequest { id, op });
    }

    /// Ask the service to mint a forwarding address for the current query.
    pub fn request_payment(&mut self, on_success: Option<SuccessHook>) {
        self.set_status(UiStatus::Loading);

        let id = self.next_id();
        if let Some(hook) = on_success {
            self.hooks.insert(id, hook);
        }
        let op = ApiOp::Payment(self.query.clone());
        self.dispatch(ApiRequest { id, op });
    }

    /// Check whether a donation sent to `address` has arrived and been
    /// forwarded. The only flow with an explicit failure branch.
    pub fn check_transaction(&mut self, address: &str) {
        if !is_bitcoin_address(address) {
            self.set_status(UiStatus::Warn);
            self.presenter.show_banner(Banner::warning(format!(
                "'{address}' does not look like a bitcoin address."
            )));
            return;
        }

        self.set_status(UiStatus::Loading);
        let id = self.next_id();
        self.dispatch(ApiRequest {
            id,
            op: ApiOp::Forward(address.to_string()),
        });
    }

    /// External navigation: update the address model and replay the encoded
    /// search when the address carries the replay flag. Replay fires at most
    /// once per navigation; the controller's own address writes never arm it.
    pub fn navigate(&mut self, address: &str) {
        self.location.navigate(address);
        if let Some(query) = self.location.take_replay() {
            self.query = query;
            self.emit(Change::Query);
            self.run_search(None, None);
        }
    }

    /// Drain completed requests and fold them into state. Returns how many
    /// completions were applied. Completions apply in the order they arrive,
    /// which for overlapping requests is not the order they were issued.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::SearchDone { id, result } => match result {
                Ok(set) => {
                    self.last_refreshed = set.relays_published.clone();
                    if set.is_empty() {
                        self.data = None;
                        self.hooks.remove(&id);
                        self.set_status(UiStatus::ResultEmpty);
                    } else {
                        self.data = Some(set);
                        self.set_status(UiStatus::Loaded);
                        if let Some(hook) = self.hooks.remove(&id) {
                            hook();
                        }
                        self.presenter.present_results();
                    }
                    self.emit(Change::Results);
                }
                Err(err) => {
                    // Known gap: no failure branch for the search flow, so
                    // the status flag is left where it was.
                    warn!(error = %err, "search request failed");
                    self.hooks.remove(&id);
                }
            },
            ApiEvent::PaymentDone { id, result } => match result {
                Ok(reply) => {
                    if let Some(address) = reply.bitcoin_address() {
                        self.payment_address = address.to_string();
                        self.set_status(UiStatus::Loaded);
                        if let Some(hook) = self.hooks.remove(&id) {
                            hook();
                        }
                    } else {
                        self.hooks.remove(&id);
                        self.set_status(UiStatus::ResultEmpty);
                    }
                    self.presenter.clear_payment_banners();
                    self.presenter.present_payment_dialog();
                    self.emit(Change::Payment);
                }
                Err(err) => {
                    // Same gap as the search flow.
                    warn!(error = %err, "payment request failed");
                    self.hooks.remove(&id);
                }
            },
            ApiEvent::ForwardDone { id: _, outcome } => match outcome {
                crate::client::ForwardOutcome::Success(reply) => {
                    self.set_status(UiStatus::Success);
                    self.presenter
                        .show_banner(Banner::success(reply.data_message()));
                }
                crate::client::ForwardOutcome::Failure(failure) => {
                    self.set_status(UiStatus::Warn);
                    self.presenter
                        .show_banner(Banner::warning(forward_failure_text(&failure)));
                }
            },
            ApiEvent::CountriesDone { id: _, result } => match result {
                Ok(countries) => {
                    debug!(count = countries.len(), "country data loaded");
                    self.countries = countries;
                    self.emit(Change::Countries);
                }
                Err(err) => {
                    warn!(error = %err, "country data unavailable");
                }
            },
        }
    }

    fn dispatch(&mut self, request: ApiRequest) {
        self.gateway.fetch(request, self.events_tx.clone());
    }

    fn set_status(&mut self, status: UiStatus) {
        if self.status != status {
            self.status = status;
            self.emit(Change::Status);
        }
    }

    fn emit(&mut self, change: Change) {
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }

    fn next_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }
}
