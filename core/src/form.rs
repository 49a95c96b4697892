//! Add/edit form state and its validation rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Field, ValidationErrors};
use crate::types::{Gender, NewUser, User};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^[^<>()\[\]\\.,;:\s@"]+(?:\.[^<>()\[\]\\.,;:\s@"]+)*"#,
        r"@([A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    ))
    .expect("email pattern is valid")
});

/// `local@domain.tld`. The local part is dot-separated atoms without
/// whitespace, quotes or `<>()[]\,;:`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Raw values typed into the modal form. Nothing here is trusted until
/// `validate` turns it into a `NewUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
}

impl UserForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn fill_from(&mut self, user: &User) {
        self.name = user.name.clone();
        self.email = user.email.clone();
        self.gender = Some(user.gender);
    }

    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<NewUser, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.push(Field::Name, "Name is required");
        }

        if self.email.trim().is_empty() {
            errors.push(Field::Email, "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.push(Field::Email, "Enter a valid email");
        }

        match self.gender {
            Some(gender) if errors.is_empty() => Ok(NewUser {
                name: self.name.clone(),
                email: self.email.clone(),
                gender,
            }),
            Some(_) => Err(errors),
            None => {
                errors.push(Field::Gender, "Gender is required");
                Err(errors)
            }
        }
    }
}
