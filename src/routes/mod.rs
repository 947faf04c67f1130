pub mod log;
pub mod submit;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn relay_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/submit", post(submit::submit))
        .route("/", get(log::list))
}
