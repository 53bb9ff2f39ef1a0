//! Dismissible notices shown in the payment area, and the selection of the
//! warning text for a failed transaction check.

use crate::client::ForwardFailure;

pub const TIMEOUT_TEXT: &str =
    "Request Timeout: the payment processor may be down, please try again in a few moments.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    /// Auto-expiry in milliseconds. Warnings stay until dismissed.
    pub auto_dismiss_ms: Option<u64>,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
            auto_dismiss_ms: None,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            text: text.into(),
            auto_dismiss_ms: None,
        }
    }

    pub fn with_auto_dismiss(mut self, ms: u64) -> Self {
        self.auto_dismiss_ms = Some(ms);
        self
    }
}

/// Pick the warning text for a failed transaction check.
///
/// Priority: a `fail` envelope speaks for itself; an `error` envelope is
/// surfaced with the HTTP code; 408/522 without a recognizable envelope mean
/// the upstream payment processor is unreachable; anything else is unknown.
pub fn forward_failure_text(failure: &ForwardFailure) -> String {
    let code = failure.code.unwrap_or(0);

    if let Some(reply) = &failure.reply {
        match reply.status.as_deref() {
            Some("fail") => return reply.data_message().to_string(),
            Some("error") => {
                return format!(
                    "Error {}: {}",
                    code,
                    reply.message.as_deref().unwrap_or("")
                );
            }
            _ => {}
        }
    }

    if code == 408 || code == 522 {
        TIMEOUT_TEXT.to_string()
    } else {
        format!("Error {code}: An unknown error occurred")
    }
}
