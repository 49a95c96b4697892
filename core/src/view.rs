//! Headless users dashboard: list state, filter, add/edit modal and the
//! mutations that reconcile local state with the server.
//!
//! # Design
//! `UsersView` owns every piece of dashboard state and is driven through
//! `&mut self` methods, so a front end only renders what it reads back.
//! Network failures never escape: each one is logged and turned into an
//! error `Notification`. Mutations are optimistic where the dashboard has
//! always been optimistic (delete removes the row before the request) and
//! server-canonical everywhere else (create/update wait for the returned
//! record). A failed delete is corrected by reloading the whole list rather
//! than by restoring the single row.

use std::mem;

use tracing::{error, info, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, ModalError, SubmitError, ValidationErrors};
use crate::form::UserForm;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::notify::Notification;
use crate::store::UserList;
use crate::types::{GenderFilter, User, UserId};

/// Rows per table page.
pub const PAGE_SIZE: usize = 8;

/// The add/edit dialog. Only Closed→Add, Closed→Edit and back to Closed are
/// valid transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Add,
    Edit(User),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Modal::Edit(_) => "Edit User",
            _ => "Add User",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            Modal::Edit(_) => "Save Changes",
            _ => "Create",
        }
    }
}

/// Text of the confirmation shown before a soft delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub title: &'static str,
    pub description: String,
    pub confirm_label: &'static str,
}

impl DeletePrompt {
    pub fn for_user(user: &User) -> Self {
        Self {
            title: "Soft delete this user?",
            description: format!("Mark \"{}\" as deleted?", user.name),
            confirm_label: "Delete",
        }
    }
}

/// What a successful submit did to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(User),
    Updated(User),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SaveKind {
    Create,
    Update(UserId),
}

/// A create or update request started by `begin_submit`. The caller
/// executes `request` and hands the result to `finish_submit`.
#[derive(Debug, Clone)]
pub struct PendingSave {
    pub request: HttpRequest,
    kind: SaveKind,
}

/// A soft-delete request started by `begin_delete`.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub request: HttpRequest,
    id: UserId,
}

#[derive(Debug)]
pub struct UsersView<T> {
    api: ApiClient<T>,
    users: UserList,
    gender_filter: GenderFilter,
    loading: bool,
    modal: Modal,
    form: UserForm,
    form_errors: Option<ValidationErrors>,
    saving: bool,
    notifications: Vec<Notification>,
}

impl<T: Transport> UsersView<T> {
    /// An empty, unloaded view. Call `load` once the front end mounts it.
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            users: UserList::default(),
            gender_filter: GenderFilter::All,
            loading: false,
            modal: Modal::Closed,
            form: UserForm::default(),
            form_errors: None,
            saving: false,
            notifications: Vec::new(),
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn users(&self) -> &[User] {
        self.users.as_slice()
    }

    pub fn visible_rows(&self) -> Vec<&User> {
        self.users.visible(self.gender_filter)
    }

    /// Number of `PAGE_SIZE` pages over the visible rows; never less than one.
    pub fn page_count(&self) -> usize {
        self.visible_rows().len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Visible rows on 1-based page `page`. Empty past the last page.
    pub fn page(&self, page: usize) -> Vec<&User> {
        if page == 0 {
            return Vec::new();
        }
        let skip = (page - 1) * PAGE_SIZE;
        self.visible_rows().into_iter().skip(skip).take(PAGE_SIZE).collect()
    }

    pub fn gender_filter(&self) -> GenderFilter {
        self.gender_filter
    }

    pub fn set_gender_filter(&mut self, filter: GenderFilter) {
        self.gender_filter = filter;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether the modal's confirm action should be enabled.
    pub fn can_confirm(&self) -> bool {
        self.modal.is_open() && !self.saving
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn editing_user(&self) -> Option<&User> {
        match &self.modal {
            Modal::Edit(user) => Some(user),
            _ => None,
        }
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub fn form_errors(&self) -> Option<&ValidationErrors> {
        self.form_errors.as_ref()
    }

    /// Confirmation text for deleting the listed user `id`.
    pub fn delete_prompt(&self, id: &UserId) -> Option<DeletePrompt> {
        self.users.get(id).map(DeletePrompt::for_user)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    /// Replaces the list with the server's non-deleted users. On failure the
    /// current list is kept.
    pub async fn load(&mut self) {
        let request = self.begin_load();
        let result = self.api.execute(request).await;
        self.finish_load(result);
    }

    /// Marks the view loading and returns the list request.
    pub fn begin_load(&mut self) -> HttpRequest {
        self.loading = true;
        self.api.client().build_list_users()
    }

    pub fn finish_load(&mut self, result: Result<HttpResponse, ApiError>) {
        match result.and_then(|response| self.api.client().parse_list_users(response)) {
            Ok(users) => {
                info!(count = users.len(), "loaded users");
                self.users.replace_all(users);
            }
            Err(err) => {
                error!(error = %err, "failed to load users");
                self.notify(Notification::error("Failed to load users"));
            }
        }
        self.loading = false;
    }

    pub fn open_add(&mut self) -> Result<(), ModalError> {
        self.ensure_closed()?;
        self.form.reset();
        self.form_errors = None;
        self.modal = Modal::Add;
        Ok(())
    }

    pub fn open_edit(&mut self, user: &User) -> Result<(), ModalError> {
        self.ensure_closed()?;
        self.form.fill_from(user);
        self.form_errors = None;
        self.modal = Modal::Edit(user.clone());
        Ok(())
    }

    /// Closes the modal without saving. Typed values stay in the form until
    /// the next open resets or refills it.
    pub fn cancel(&mut self) -> Result<(), ModalError> {
        if !self.modal.is_open() {
            warn!("cancel with no open form");
            return Err(ModalError::NotOpen);
        }
        self.modal = Modal::Closed;
        self.form_errors = None;
        Ok(())
    }

    /// Soft-deletes a user. The row disappears immediately; if the server
    /// rejects the change the whole list is reloaded to bring it back.
    pub async fn delete(&mut self, id: &UserId) {
        let pending = match self.begin_delete(id) {
            Ok(pending) => pending,
            Err(err) => {
                error!(user_id = %id, error = %err, "delete failed");
                self.notify(Notification::error("Delete failed"));
                return;
            }
        };
        let result = self.api.execute(pending.request.clone()).await;
        if let Some(reload) = self.finish_delete(pending, result) {
            let result = self.api.execute(reload).await;
            self.finish_load(result);
        }
    }

    /// Removes the row locally and returns the soft-delete request.
    pub fn begin_delete(&mut self, id: &UserId) -> Result<PendingDelete, ApiError> {
        let request = self.api.client().build_soft_delete_user(id)?;
        self.users.remove(id);
        Ok(PendingDelete {
            request,
            id: id.clone(),
        })
    }

    /// Settles a soft delete. The response body is ignored. On failure the
    /// view starts a reload and returns its request for the caller to run
    /// through `finish_load`.
    pub fn finish_delete(
        &mut self,
        pending: PendingDelete,
        result: Result<HttpResponse, ApiError>,
    ) -> Option<HttpRequest> {
        match result.and_then(|response| self.api.client().parse_soft_delete_user(response)) {
            Ok(()) => {
                info!(user_id = %pending.id, "user deleted");
                self.notify(Notification::success("User deleted"));
                None
            }
            Err(err) => {
                error!(user_id = %pending.id, error = %err, "delete failed");
                self.notify(Notification::error("Delete failed"));
                Some(self.begin_load())
            }
        }
    }

    /// Validates the form and creates or updates a user.
    ///
    /// Validation failures are stored in `form_errors` and returned without
    /// any request or notification. Network failures are logged, notified and
    /// returned with the modal left open.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let pending = self.begin_submit()?;
        let result = self.api.execute(pending.request.clone()).await;
        self.finish_submit(pending, result)
    }

    /// Validate → guard → build. On success `saving` is set and the request
    /// to execute is returned; nothing is sent on any error path.
    pub fn begin_submit(&mut self) -> Result<PendingSave, SubmitError> {
        let kind = match &self.modal {
            Modal::Closed => return Err(SubmitError::ModalClosed),
            Modal::Add => SaveKind::Create,
            Modal::Edit(user) => SaveKind::Update(user.id.clone()),
        };

        let values = match self.form.validate() {
            Ok(values) => values,
            Err(errors) => {
                self.form_errors = Some(errors.clone());
                return Err(errors.into());
            }
        };
        self.form_errors = None;

        let client = self.api.client();
        let built = match &kind {
            SaveKind::Create => client.build_create_user(&values),
            SaveKind::Update(id) => client.build_update_user(id, &values.into()),
        };
        let request = match built {
            Ok(request) => request,
            Err(err) => return Err(self.save_failed(err)),
        };

        self.saving = true;
        Ok(PendingSave { request, kind })
    }

    /// Reconciles the server's canonical record and closes the modal, or
    /// reports the failure with the modal left open. Clears `saving` on
    /// every path.
    pub fn finish_submit(
        &mut self,
        pending: PendingSave,
        result: Result<HttpResponse, ApiError>,
    ) -> Result<SubmitOutcome, SubmitError> {
        self.saving = false;
        let user = match result.and_then(|response| self.api.client().parse_user(response)) {
            Ok(user) => user,
            Err(err) => return Err(self.save_failed(err)),
        };

        let outcome = match pending.kind {
            SaveKind::Update(_) => {
                if !self.users.replace(user.clone()) {
                    warn!(user_id = %user.id, "updated user is no longer in the list");
                }
                info!(user_id = %user.id, "user updated");
                self.notify(Notification::success("User updated"));
                SubmitOutcome::Updated(user)
            }
            SaveKind::Create => {
                info!(user_id = %user.id, "user created");
                self.users.prepend(user.clone());
                self.notify(Notification::success("User added"));
                SubmitOutcome::Created(user)
            }
        };
        self.modal = Modal::Closed;
        self.form.reset();
        Ok(outcome)
    }

    fn save_failed(&mut self, err: ApiError) -> SubmitError {
        error!(error = %err, "save failed");
        self.notify(Notification::error("Save failed"));
        err.into()
    }

    fn ensure_closed(&self) -> Result<(), ModalError> {
        if self.modal.is_open() {
            warn!("form already open");
            return Err(ModalError::AlreadyOpen);
        }
        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
