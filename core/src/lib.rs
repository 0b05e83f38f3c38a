//! Synchronous client for the poll service.
//!
//! # Overview
//! Registers users, lists polls page by page, casts votes and fetches vote
//! totals over HTTP/JSON. Every operation returns a `Result` whose error side
//! carries a human-readable message and an `ErrorKind`.
//!
//! # Design
//! - `PollClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `BlockingClient` drives `PollClient` through a `Transport`; the default
//!   transport is ureq.
//! - The bearer token lives in a `Session` owned by the client instance, so
//!   independent sessions can coexist in one process.
//! - Status codes with a known meaning per operation are declared in
//!   `status` tables rather than matched inline.
//! - Token acquisition (login) is left to the caller: obtain a token from the
//!   service and pass it to `BlockingClient::set_token`.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pagination;
pub mod session;
pub mod status;
pub mod transport;
pub mod types;

pub use blocking::BlockingClient;
pub use client::PollClient;
pub use config::ClientConfig;
pub use error::{ApiError, ErrorKind, PollsError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pagination::PageWindow;
pub use session::Session;
pub use transport::{Transport, UreqTransport};
pub use types::{
    OptionResult, Poll, PollOption, PollResults, PollsPage, RegisterUser, UserRecord, VoteAck, VoteRequest,
};
