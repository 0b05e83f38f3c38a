//! Per-operation status-code tables.
//!
//! Each operation declares which non-2xx statuses carry a known meaning. A
//! status missing from the table falls back to the generic HTTP error text.

use crate::error::ApiError;
use crate::http::HttpResponse;

/// A static status → message lookup.
#[derive(Debug, Clone, Copy)]
pub struct StatusMessages(&'static [(u16, &'static str)]);

pub const REGISTER: StatusMessages = StatusMessages(&[(400, "Username already registered")]);

pub const LIST_POLLS: StatusMessages = StatusMessages(&[]);

pub const VOTE: StatusMessages = StatusMessages(&[
    (401, "Unauthorized. Please check your authentication."),
    (404, "Poll or option not found."),
]);

pub const POLL_RESULTS: StatusMessages = StatusMessages(&[(404, "Poll not found.")]);

impl StatusMessages {
    pub fn lookup(&self, status: u16) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, message)| *message)
    }

    /// Map a non-2xx response to an `ApiError`; 2xx passes.
    pub fn check(&self, response: &HttpResponse) -> Result<(), ApiError> {
        if response.is_success() {
            return Ok(());
        }
        let message = match self.lookup(response.status) {
            Some(known) => known.to_string(),
            None => generic_message(response.status),
        };
        Err(ApiError::Status {
            status: response.status,
            message,
        })
    }
}

/// `HTTP error occurred: 500 Server Error: Internal Server Error`
pub fn generic_message(status: u16) -> String {
    let class = match status {
        400..=499 => "Client Error",
        500..=599 => "Server Error",
        _ => "Unexpected Status",
    };
    let reason = ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    format!("HTTP error occurred: {status} {class}: {reason}")
}
