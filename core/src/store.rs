//! The view's local copy of the user list.
//!
//! # Design
//! `UserList` is the only place the dashboard keeps users. It is rebuilt
//! wholesale on every load and patched through the methods below after each
//! successful mutation, which keeps reconciliation testable without a view.
//! Order is the server's, except that created users are prepended.

use crate::types::{GenderFilter, User, UserId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserList {
    users: Vec<User>,
}

impl UserList {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn replace_all(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn prepend(&mut self, user: User) {
        self.users.insert(0, user);
    }

    /// Swaps in the canonical record at the position of the entry with the
    /// same id. Returns false when no such entry exists.
    pub fn replace(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &UserId) -> Option<User> {
        let index = self.users.iter().position(|u| &u.id == id)?;
        Some(self.users.remove(index))
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Rows to display for `filter`, in list order.
    pub fn visible(&self, filter: GenderFilter) -> Vec<&User> {
        self.users.iter().filter(|u| filter.matches(u.gender)).collect()
    }

    pub fn as_slice(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
