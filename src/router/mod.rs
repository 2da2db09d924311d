//! HTTP handlers.
pub mod create;
pub mod delete;
pub mod emails;
pub mod matches;
pub mod status;
pub mod users;

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ServerError;

/// JSON body checked with [`Validate`] before reaching the handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Valid<T>(pub T);

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Valid(value))
    }
}

/// Plain confirmation body.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Application state backed by a fresh in-memory store.
#[cfg(test)]
pub async fn state() -> crate::AppState {
    use std::sync::Arc;

    use crate::user::{SqliteUserRepository, UserService};

    let pool = crate::database::sqlite(crate::database::IN_MEMORY_SQLITE)
        .await
        .expect("cannot open in-memory sqlite");

    crate::AppState {
        config: Arc::new(crate::config::Configuration::default()),
        users: UserService::new(Arc::new(SqliteUserRepository::new(pool))),
        metrics: None,
    }
}

/// Create a user through the API and return it.
#[cfg(test)]
pub async fn create_user(
    app: axum::Router,
    email: &str,
    gender: &str,
    interests: &str,
) -> crate::user::User {
    use http_body_util::BodyExt;

    let body = serde_json::json!({
        "name": "Test",
        "age": 28,
        "gender": gender,
        "email": email,
        "city": "Berlin",
        "interests": interests,
    });
    let response = crate::make_request(
        app,
        axum::http::Method::POST,
        "/users/",
        body.to_string(),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
