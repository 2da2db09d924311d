//! Delete user from database.

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Result;
use crate::router::Message;

pub async fn handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Message>> {
    state.users.delete(user_id).await?;
    Ok(Json(Message::new("User deleted successfully")))
}

#[cfg(test)]
pub(super) mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    use crate::router::Message;
    use crate::*;

    #[tokio::test]
    async fn test_delete_handler() {
        let app = app(router::state().await);
        let user =
            router::create_user(app.clone(), "ana@example.com", "F", "tango").await;

        let response = make_request(
            app.clone(),
            Method::DELETE,
            &format!("/delete/{}", user.id),
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Message = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, Message::new("User deleted successfully"));

        // User must be deleted.
        let response = make_request(
            app,
            Method::GET,
            &format!("/users/{}", user.id),
            String::default(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_user() {
        let app = app(router::state().await);

        let response =
            make_request(app, Method::DELETE, "/delete/3", String::default()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
