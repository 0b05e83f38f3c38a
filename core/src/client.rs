//! HTTP request builder and response parser for the poll API.
//!
//! # Design
//! `PollClient` holds the base URL and the caller's `Session`. Each operation
//! is split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. Nothing here performs
//! I/O; `BlockingClient` pairs these with a `Transport`.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, PollsError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::pagination::PageWindow;
use crate::session::Session;
use crate::status;
use crate::types::{Poll, PollResults, PollsPage, RegisterUser, UserRecord, VoteAck, VoteRequest};

/// Response header carrying the total number of polls on the server.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Debug, Clone)]
pub struct PollClient {
    base_url: String,
    session: Session,
}

impl PollClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_session(base_url, Session::new())
    }

    pub fn with_session(base_url: &str, session: Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn build_register(&self, input: &RegisterUser) -> Result<HttpRequest, ApiError> {
        // Registration is never authenticated, even with a token on hand.
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/register", self.base_url),
            headers: vec![json_content_type()],
            body: Some(to_json(input)?),
        })
    }

    pub fn build_list_polls(&self, window: PageWindow) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/polls?{}", self.base_url, window.query()),
            headers: self.headers(),
            body: None,
        }
    }

    /// Fails with `AuthenticationRequired` when the session has no token, so
    /// an unauthenticated vote never reaches the transport.
    pub fn build_vote(&self, poll_id: i64, option_id: i64) -> Result<HttpRequest, ApiError> {
        if !self.session.is_authenticated() {
            return Err(ApiError::AuthenticationRequired);
        }
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/polls/{poll_id}/vote", self.base_url),
            headers: self.headers(),
            body: Some(to_json(&VoteRequest { option_id })?),
        })
    }

    pub fn build_poll_results(&self, poll_id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/polls/{poll_id}/results", self.base_url),
            headers: self.headers(),
            body: None,
        }
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<UserRecord, ApiError> {
        status::REGISTER.check(&response)?;
        from_json(&response.body)
    }

    /// `window` is the clamped window the request was built with; it is
    /// echoed into both the page and the error.
    pub fn parse_list_polls(&self, window: PageWindow, response: HttpResponse) -> Result<PollsPage, PollsError> {
        let fail = |error| PollsError::new(error, window.skip, window.limit);
        status::LIST_POLLS.check(&response).map_err(fail)?;
        let items: Vec<Poll> = from_json(&response.body).map_err(fail)?;
        let total = response
            .header(TOTAL_COUNT_HEADER)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(items.len() as u64);
        Ok(PollsPage {
            items,
            total,
            skip: window.skip,
            limit: window.limit,
        })
    }

    pub fn parse_vote(&self, response: HttpResponse) -> Result<VoteAck, ApiError> {
        status::VOTE.check(&response)?;
        if response.body.trim().is_empty() {
            return Ok(VoteAck(serde_json::Value::Null));
        }
        from_json(&response.body)
    }

    pub fn parse_poll_results(&self, response: HttpResponse) -> Result<PollResults, ApiError> {
        status::POLL_RESULTS.check(&response)?;
        from_json(&response.body)
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![json_content_type()];
        headers.extend(self.session.authorization());
        headers
    }
}

fn json_content_type() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
