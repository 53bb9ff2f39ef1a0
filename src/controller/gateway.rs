//! Request/completion plumbing between the controller and the HTTP client.
//!
//! Requests run on worker threads and completions are delivered over a
//! channel, so they apply in completion order, not issue order. Overlapping
//! requests are neither serialized nor cancellable; a stale completion still
//! lands.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::client::{ApiClient, ApiError, ForwardOutcome};
use crate::query::SearchQuery;
use crate::schemas::{Country, PaymentResponse, RelaySet};

#[derive(Debug, Clone)]
pub enum ApiOp {
    Search(SearchQuery),
    Payment(SearchQuery),
    Forward(String),
    Countries,
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub id: u64,
    pub op: ApiOp,
}

#[derive(Debug)]
pub enum ApiEvent {
    SearchDone {
        id: u64,
        result: Result<RelaySet, ApiError>,
    },
    PaymentDone {
        id: u64,
        result: Result<PaymentResponse, ApiError>,
    },
    ForwardDone {
        id: u64,
        outcome: ForwardOutcome,
    },
    CountriesDone {
        id: u64,
        result: Result<Vec<Country>, ApiError>,
    },
}

pub trait Gateway {
    fn fetch(&mut self, request: ApiRequest, reply: Sender<ApiEvent>);
}

/// Gateway backed by [`ApiClient`], one worker thread per request.
pub struct HttpGateway {
    client: Arc<ApiClient>,
}

impl HttpGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl Gateway for HttpGateway {
    fn fetch(&mut self, request: ApiRequest, reply: Sender<ApiEvent>) {
        let client = self.client.clone();
        thread::spawn(move || {
            let event = match request.op {
                ApiOp::Search(query) => ApiEvent::SearchDone {
                    id: request.id,
                    result: client.search(&query),
                },
                ApiOp::Payment(query) => ApiEvent::PaymentDone {
                    id: request.id,
                    result: client.payment(&query),
                },
                ApiOp::Forward(address) => ApiEvent::ForwardDone {
                    id: request.id,
                    outcome: client.forward(&address),
                },
                ApiOp::Countries => ApiEvent::CountriesDone {
                    id: request.id,
                    result: client.countries(),
                },
            };
            let _ = reply.send(event);
        });
    }
}
