use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub deleted: bool,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub deleted: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub deleted: Option<bool>,
}

/// Users in insertion order.
pub type Db = Arc<RwLock<Vec<User>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-populated with `users`.
pub fn app_with(users: Vec<User>) -> Router {
    let db: Db = Arc::new(RwLock::new(users));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).patch(update_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<User>> {
    let users = db.read().await;
    Json(
        users
            .iter()
            .filter(|u| params.deleted.map_or(true, |d| u.deleted == d))
            .cloned()
            .collect(),
    )
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        gender: input.gender,
        deleted: input.deleted,
    };
    db.write().await.push(user.clone());
    info!(id = %user.id, "user created");
    (StatusCode::CREATED, Json(user))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.write().await;
    let user = users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(gender) = input.gender {
        user.gender = gender;
    }
    if let Some(deleted) = input.deleted {
        user.deleted = deleted;
    }
    info!(id = %user.id, deleted = user.deleted, "user updated");
    Ok(Json(user.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_to_json() {
        let user = User {
            id: "u-1".to_string(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            gender: Gender::Female,
            deleted: false,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "u-1");
        assert_eq!(json["gender"], "Female");
        assert_eq!(json["deleted"], false);
    }

    #[test]
    fn create_user_defaults_deleted_to_false() {
        let input: CreateUser =
            serde_json::from_str(r#"{"name":"Ann","email":"ann@x.com","gender":"Female"}"#)
                .unwrap();
        assert!(!input.deleted);
    }

    #[test]
    fn create_user_rejects_missing_gender() {
        let result: Result<CreateUser, _> =
            serde_json::from_str(r#"{"name":"Ann","email":"ann@x.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_user_all_fields_optional() {
        let input: UpdateUser = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.name.is_none());
        assert!(input.email.is_none());
        assert!(input.gender.is_none());
        assert!(input.deleted.is_none());
    }

    #[test]
    fn update_user_soft_delete_only() {
        let input: UpdateUser = serde_json::from_str(r#"{"deleted":true}"#).unwrap();
        assert_eq!(input.deleted, Some(true));
        assert!(input.name.is_none());
    }
}
