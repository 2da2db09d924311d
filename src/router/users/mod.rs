//! Users-related HTTP API.
mod get;
mod list;
mod update;

use axum::Router;
use axum::routing::get;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // `POST /users/` goes to `create`, `GET /users/` to `list`.
        .route(
            "/users/",
            get(list::handler).post(crate::router::create::handler),
        )
        .route(
            "/users",
            get(list::handler).post(crate::router::create::handler),
        )
        // `GET /users/:ID` goes to `get`, `PATCH /users/:ID` to `update`.
        .route("/users/{user_id}", get(get::handler).patch(update::handler))
}
