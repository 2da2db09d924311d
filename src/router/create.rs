use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::Result;
use crate::router::Valid;
use crate::user::{Interests, NewUser, User};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, message = "Name must not be empty."))]
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: Interests,
}

impl From<Body> for NewUser {
    fn from(body: Body) -> Self {
        Self {
            name: body.name,
            age: body.age,
            gender: body.gender,
            email: body.email,
            city: body.city,
            interests: body.interests,
        }
    }
}

/// Handler to create user.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<Json<User>> {
    Ok(Json(state.users.create(body.into()).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::json;

    use crate::*;

    fn body(email: &str) -> serde_json::Value {
        json!({
            "name": "Noor",
            "age": 31,
            "gender": "F",
            "email": email,
            "city": "Amman",
            "interests": "climbing,jazz",
        })
    }

    #[tokio::test]
    async fn test_create_handler() {
        let app = app(router::state().await);

        let response = make_request(
            app.clone(),
            Method::POST,
            "/users/",
            body("noor@example.com").to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let user: user::User = serde_json::from_slice(&bytes).unwrap();
        assert!(user.id > 0);
        assert_eq!(user.email, "noor@example.com");
        assert_eq!(user.interests.encode(), "climbing,jazz");

        // `id` is stable on subsequent fetch.
        let response = make_request(
            app,
            Method::GET,
            &format!("/users/{}", user.id),
            String::default(),
        )
        .await;
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let fetched: user::User = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_create_with_invalid_email() {
        let app = app(router::state().await);

        let response = make_request(
            app,
            Method::POST,
            "/users/",
            body("noor.example.com").to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["detail"], "Invalid email");
    }

    #[tokio::test]
    async fn test_create_with_registered_email() {
        let app = app(router::state().await);
        router::create_user(app.clone(), "noor@example.com", "F", "jazz").await;

        let response = make_request(
            app,
            Method::POST,
            "/users/",
            body("noor@example.com").to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["detail"], "Email already registered");
    }

    #[tokio::test]
    async fn test_create_with_empty_name() {
        let app = app(router::state().await);

        let mut body = body("noor@example.com");
        body["name"] = json!("");
        let response =
            make_request(app, Method::POST, "/users/", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["errors"][0]["field"], "name");
    }

    #[tokio::test]
    async fn test_create_with_missing_field() {
        let app = app(router::state().await);

        let mut body = body("noor@example.com");
        body.as_object_mut().unwrap().remove("city");
        let response =
            make_request(app, Method::POST, "/users/", body.to_string()).await;

        assert!(response.status().is_client_error());
    }
}
