//! Error types for the users API client and view.
//!
//! # Design
//! Two failure families exist. `ApiError` covers everything that can go wrong
//! once a request is attempted: the request never completed, the server
//! answered with a non-2xx status, or a body could not be (de)serialized.
//! `ValidationErrors` covers client-side form checks, which block the request
//! from being sent at all. `NotFound` keeps its own variant because callers
//! distinguish "the user does not exist" from other unexpected statuses.

use std::fmt;

use thiserror::Error;

/// Errors produced by `UsersClient`, `ApiClient` and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("timed out: {err}"))
        } else if err.is_connect() {
            ApiError::Transport(format!("connection failed: {err}"))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// A form field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Gender,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Gender => write!(f, "gender"),
        }
    }
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Field-level validation failures, at most one per field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// The message shown next to `field`, if it failed.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Why `UsersView::submit` did not complete.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form failed client-side checks; nothing was sent.
    #[error("invalid form: {0}")]
    Validation(#[from] ValidationErrors),

    /// The create or update request failed.
    #[error("save failed: {0}")]
    Network(#[from] ApiError),

    /// There is no add or edit session to submit.
    #[error("no form is open")]
    ModalClosed,
}

/// A modal transition that the state machine does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("a form is already open")]
    AlreadyOpen,

    #[error("no form is open")]
    NotOpen,
}
