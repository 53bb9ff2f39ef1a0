pub mod client;
pub mod controller;
pub mod formatters;
pub mod interactive;
pub mod pages;
pub mod query;
pub mod schemas;
pub mod trace;

pub use client::{ApiClient, ApiError, ForwardFailure, ForwardOutcome};
pub use controller::{
    Banner, BannerKind, Change, Presenter, SearchController, UiStatus, forward_failure_text,
};
pub use query::{ExitFilter, SearchQuery, SortKey, parse_query_string};
pub use schemas::{Country, ForwardReply, PaymentResponse, Relay, RelaySet};
