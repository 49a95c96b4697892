//! Request builder, response parser and async client for the users API.
//!
//! # Design
//! `UsersClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, so
//! the wire format is testable without I/O. `ApiClient` pairs a `UsersClient`
//! with a `Transport` and runs build → execute → parse for one request at a
//! time: no retries, no caching, no auth.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{NewUser, User, UserId, UserPatch};

/// Stateless builder/parser for the users API.
#[derive(Debug, Clone)]
pub struct UsersClient {
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, path: &str, query: &[(&str, &str)]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(path),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_post<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.build_with_body(HttpMethod::Post, path, body)
    }

    pub fn build_patch<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.build_with_body(HttpMethod::Patch, path, body)
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.build_get("/users", &[("deleted", "false")])
    }

    pub fn build_create_user(&self, input: &NewUser) -> Result<HttpRequest, ApiError> {
        self.build_post("/users", input)
    }

    pub fn build_update_user(&self, id: &UserId, patch: &UserPatch) -> Result<HttpRequest, ApiError> {
        self.build_patch(&user_path(id), patch)
    }

    pub fn build_soft_delete_user(&self, id: &UserId) -> Result<HttpRequest, ApiError> {
        self.build_patch(&user_path(id), &UserPatch::soft_delete())
    }

    /// Decode a 2xx body as `R`.
    pub fn parse_json<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        self.parse_json(response)
    }

    /// Parses the canonical record returned by create and update.
    pub fn parse_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        self.parse_json(response)
    }

    /// Soft delete only needs a 2xx; the returned record is ignored.
    pub fn parse_soft_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_with_body<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: self.url(path),
            query: Vec::new(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn user_path(id: &UserId) -> String {
    format!("/users/{id}")
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Async users API client over a `Transport`.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    client: UsersClient,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: UsersClient::new(&config.base_url),
            transport,
        }
    }

    pub fn client(&self) -> &UsersClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<R, ApiError> {
        let request = self.client.build_get(path, query);
        self.send(request).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = self.client.build_post(path, body)?;
        self.send(request).await
    }

    pub async fn patch<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = self.client.build_patch(path, body)?;
        self.send(request).await
    }

    /// All users the server has not soft-deleted, in server order.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users", &[("deleted", "false")]).await
    }

    pub async fn create_user(&self, input: &NewUser) -> Result<User, ApiError> {
        self.post("/users", input).await
    }

    pub async fn update_user(&self, id: &UserId, patch: &UserPatch) -> Result<User, ApiError> {
        self.patch(&user_path(id), patch).await
    }

    /// Sets the deleted flag. The returned record is not needed by callers,
    /// so only the status is checked.
    pub async fn soft_delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        let request = self.client.build_soft_delete_user(id)?;
        let response = self.execute(request).await?;
        self.client.parse_soft_delete_user(response)
    }

    async fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        self.client.parse_json(response)
    }

    /// Runs one request over the transport without interpreting the status.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
