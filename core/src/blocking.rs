//! Blocking client that executes the four poll operations end to end.
//!
//! Each call builds a request with `PollClient`, hands it to the `Transport`,
//! and parses the outcome. Every path ends in a `Result`; nothing panics or
//! escapes as an unclassified error.

use tracing::{debug, warn};

use crate::client::PollClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, PollsError};
use crate::http::{HttpRequest, HttpResponse};
use crate::pagination::PageWindow;
use crate::session::Session;
use crate::transport::{Transport, UreqTransport};
use crate::types::{PollResults, PollsPage, RegisterUser, UserRecord, VoteAck};

pub struct BlockingClient<T = UreqTransport> {
    client: PollClient,
    transport: T,
}

impl BlockingClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(PollClient::new(base_url), UreqTransport::new())
    }

    /// Client for the base URL named by `POLL_API_BASE_URL` (or the default).
    pub fn from_env() -> Self {
        Self::from_config(&ClientConfig::from_env())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(PollClient::from_config(config), UreqTransport::new())
    }
}

impl<T: Transport> BlockingClient<T> {
    pub fn with_transport(client: PollClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Assign the bearer token obtained from the service's login flow.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.client.session_mut().set_token(token);
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn register_user(&self, username: &str, password: &str) -> Result<UserRecord, ApiError> {
        let input = RegisterUser {
            username: username.to_string(),
            password: password.to_string(),
        };
        let result = self
            .client
            .build_register(&input)
            .and_then(|req| self.send(&req))
            .and_then(|resp| self.client.parse_register(resp));
        log_failure("register", result)
    }

    /// List polls. `skip` and `limit` are clamped to `>= 0` and `1..=100`;
    /// use `PageWindow::default()` values (0, 10) for the first page.
    pub fn get_polls(&self, skip: i64, limit: i64) -> Result<PollsPage, PollsError> {
        let window = PageWindow::clamped(skip, limit);
        let req = self.client.build_list_polls(window);
        let result = self
            .send(&req)
            .map_err(|error| PollsError::new(error, window.skip, window.limit))
            .and_then(|resp| self.client.parse_list_polls(window, resp));
        if let Err(err) = &result {
            warn!(operation = "list_polls", kind = ?err.kind(), skip = err.skip, limit = err.limit, "{err}");
        }
        result
    }

    pub fn vote_on_poll(&self, poll_id: i64, option_id: i64) -> Result<VoteAck, ApiError> {
        let result = self
            .client
            .build_vote(poll_id, option_id)
            .and_then(|req| self.send(&req))
            .and_then(|resp| self.client.parse_vote(resp));
        log_failure("vote", result)
    }

    pub fn get_poll_results(&self, poll_id: i64) -> Result<PollResults, ApiError> {
        let req = self.client.build_poll_results(poll_id);
        let result = self
            .send(&req)
            .and_then(|resp| self.client.parse_poll_results(resp));
        log_failure("poll_results", result)
    }

    fn send(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %req.method, url = %req.url, "sending request");
        let resp = self.transport.execute(req)?;
        debug!(status = resp.status, url = %req.url, "received response");
        Ok(resp)
    }
}

fn log_failure<V>(operation: &'static str, result: Result<V, ApiError>) -> Result<V, ApiError> {
    if let Err(err) = &result {
        warn!(operation, kind = ?err.kind(), status = ?err.status(), "{err}");
    }
    result
}
