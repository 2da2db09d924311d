use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Result;

/// Ids of users sharing an interest with `user_id` and of another gender.
pub async fn handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<i64>>> {
    Ok(Json(state.users.matches(user_id).await?))
}
