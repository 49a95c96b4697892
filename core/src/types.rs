//! Domain DTOs for the users API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. `UserId` is
//! opaque: backends in the wild hand out either numeric or string ids, so it
//! accepts both on the wire and always holds text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned user identifier. Never constructed by the dashboard for
/// new records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireId", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for UserId {
    fn from(raw: WireId) -> Self {
        match raw {
            WireId::Text(s) => UserId(s),
            WireId::Number(n) => UserId(n.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Which rows the table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderFilter {
    #[default]
    All,
    Male,
    Female,
}

impl GenderFilter {
    pub fn matches(self, gender: Gender) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Male => gender == Gender::Male,
            GenderFilter::Female => gender == Gender::Female,
        }
    }
}

impl FromStr for GenderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(GenderFilter::All),
            other => other.parse::<Gender>().map(GenderFilter::from),
        }
    }
}

impl From<Gender> for GenderFilter {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => GenderFilter::Male,
            Gender::Female => GenderFilter::Female,
        }
    }
}

/// A user record as returned by the API. This is the canonical version of
/// the entity; local copies are replaced by it after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    #[serde(default)]
    pub deleted: bool,
}

/// Request payload for creating a user. Also the validated form output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub gender: Gender,
}

/// Request payload for a partial update. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl UserPatch {
    /// `{"deleted": true}`
    pub fn soft_delete() -> Self {
        Self {
            deleted: Some(true),
            ..Self::default()
        }
    }
}

impl From<NewUser> for UserPatch {
    fn from(values: NewUser) -> Self {
        Self {
            name: Some(values.name),
            email: Some(values.email),
            gender: Some(values.gender),
            deleted: None,
        }
    }
}
