use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::Result;
use crate::router::Message;

/// Whether every stored email is well-formed.
pub async fn handler(State(state): State<AppState>) -> Result<Json<Message>> {
    let status = state.users.check_emails().await?;
    Ok(Json(Message::new(status.message())))
}
