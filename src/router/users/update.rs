//! Partial update of a user.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::ServerError;
use crate::router::Valid;
use crate::user::{Interests, User, UserPatch};

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(length(min = 1, message = "Name must not be empty."))]
    name: Option<String>,
    age: Option<i32>,
    gender: Option<String>,
    email: Option<String>,
    city: Option<String>,
    interests: Option<Interests>,
}

impl From<Body> for UserPatch {
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

pub async fn handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Valid(body): Valid<Body>,
) -> Result<Json<User>, ServerError> {
    Ok(Json(state.users.update(user_id, body.into()).await?))
}
