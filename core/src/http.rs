//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `UsersClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. Executing a request is the job of a
//! `Transport`, which keeps the client and the view deterministic under test:
//! production code plugs in `ReqwestTransport`, tests plug in a scripted one.
//!
//! All fields use owned types (`String`, `Vec`) so values can be recorded,
//! cloned and compared freely.

use std::future::Future;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL without the query string; query parameters are
/// kept separate so the transport can encode them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// `headers` mirrors `HttpRequest::headers` so a host-side transport can hand
/// over everything it received. The users API is decided by status and body
/// alone; the parsers never read headers.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Response headers with lowercase names, in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Executes `HttpRequest`s.
///
/// Implementations fail only when the request could not complete
/// (`ApiError::Transport`). Every HTTP status, including 4xx and 5xx, comes
/// back as an `HttpResponse` so the client decides what counts as success.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}
