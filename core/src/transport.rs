//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the only I/O seam in the crate. `UreqTransport` is the
//! production implementation; tests substitute scripted transports to drive
//! every status and failure path without a server.

use ureq::RequestBuilder;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    /// Perform one round-trip. Any response, whatever its status, is `Ok`;
    /// `Err` means no response was obtained.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status interpretation belongs to the client, so 4xx/5xx must come
        // back as data rather than `Err`.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let headers = &request.headers;
        let result = match (request.method, &request.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&request.url), headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&request.url), headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&request.url), headers).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // A non-2xx status is already a complete answer; its body must never
        // turn it into a transport failure.
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) if !(200..300).contains(&status) => String::new(),
            Err(e) => return Err(TransportError(e.to_string())),
        };

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
