//! Blocking HTTP client for the donation service's JSON endpoints.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

use crate::query::SearchQuery;
use crate::schemas::{Country, ForwardReply, PaymentResponse, RelaySet};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service answered {code}: {body}")]
    Status { code: u16, body: String },
}

/// Outcome of a transaction check. The failure side keeps whatever the
/// service managed to say, so the caller can pick the right banner text.
#[derive(Debug)]
pub enum ForwardOutcome {
    Success(ForwardReply),
    Failure(ForwardFailure),
}

#[derive(Debug, Default)]
pub struct ForwardFailure {
    /// HTTP status code, when a response was obtained at all.
    pub code: Option<u16>,
    /// Decoded failure envelope, when the body was well-formed JSON.
    pub reply: Option<ForwardReply>,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `result.json` with the query as request parameters.
    pub fn search(&self, query: &SearchQuery) -> Result<RelaySet, ApiError> {
        let url = format!("{}/result.json", self.base_url);
        debug!(%url, "search request");
        let response = self
            .client
            .get(&url)
            .query(&query.to_params())
            .send()?;

        if response.status().is_success() {
            Ok(response.json()?)
        } else {
            Err(status_error(response))
        }
    }

    /// GET `payment.json` with the query as request parameters.
    pub fn payment(&self, query: &SearchQuery) -> Result<PaymentResponse, ApiError> {
        let url = format!("{}/payment.json", self.base_url);
        debug!(%url, "payment request");
        let response = self
            .client
            .get(&url)
            .query(&query.to_params())
            .send()?;

        if response.status().is_success() {
            Ok(response.json()?)
        } else {
            Err(status_error(response))
        }
    }

    /// GET `forward/{address}`. Never returns `Err`: every failure shape is
    /// folded into [`ForwardOutcome::Failure`] for banner selection.
    pub fn forward(&self, address: &str) -> ForwardOutcome {
        let url = format!("{}/forward/{}", self.base_url, address);
        debug!(%url, "forward request");

        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "forward transport failure");
                return ForwardOutcome::Failure(ForwardFailure::default());
            }
        };

        let code = response.status().as_u16();
        if response.status().is_success() {
            match response.json::<ForwardReply>() {
                Ok(reply) => ForwardOutcome::Success(reply),
                Err(_) => ForwardOutcome::Failure(ForwardFailure {
                    code: Some(code),
                    reply: None,
                }),
            }
        } else {
            let reply = response.json::<ForwardReply>().ok();
            ForwardOutcome::Failure(ForwardFailure {
                code: Some(code),
                reply,
            })
        }
    }

    /// GET the static country reference data. Fetched once at bootstrap.
    pub fn countries(&self) -> Result<Vec<Country>, ApiError> {
        let url = format!("{}/static/data/cc.json", self.base_url);
        let response = self.client.get(&url).send()?;

        if response.status().is_success() {
            Ok(response.json()?)
        } else {
            Err(status_error(response))
        }
    }

    /// GET the server-rendered results fragment for a raw query string
    /// (leading `?` included), as the legacy pages do.
    pub fn result_fragment(&self, query_string: &str) -> Result<String, ApiError> {
        let url = format!("{}/result{}", self.base_url, query_string);
        debug!(%url, "fragment request");
        let response = self.client.get(&url).send()?;

        if response.status().is_success() {
            Ok(response.text()?)
        } else {
            Err(status_error(response))
        }
    }
}

fn status_error(response: reqwest::blocking::Response) -> ApiError {
    let code = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    ApiError::Status { code, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }
}
