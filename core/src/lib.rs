//! Headless core of the users management dashboard.
//!
//! # Overview
//! Manages a list of users (name, email, gender) against a REST backend with
//! soft delete and client-side gender filtering. Rendering is left to the
//! caller: `UsersView` holds all dashboard state and exposes the operations a
//! front end wires to its buttons.
//!
//! # Design
//! - `UsersClient` is stateless and split into `build_*` / `parse_*`, so the
//!   wire format is tested without I/O.
//! - `ApiClient` runs one request per call over a `Transport`;
//!   `ReqwestTransport` is the network implementation.
//! - `UserList` is the only local copy of users and exposes the reconcile
//!   operations (replace all, prepend, replace by id, remove by id).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod notify;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

pub use client::{ApiClient, UsersClient};
pub use config::ClientConfig;
pub use error::{ApiError, Field, FieldError, ModalError, SubmitError, ValidationErrors};
pub use form::UserForm;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notify::{Level, Notification};
pub use store::UserList;
pub use transport::ReqwestTransport;
pub use types::{Gender, GenderFilter, NewUser, User, UserId, UserPatch};
pub use view::{DeletePrompt, Modal, PendingDelete, PendingSave, SubmitOutcome, UsersView, PAGE_SIZE};
