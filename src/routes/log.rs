use axum::extract::State;
use axum::Json;
use serde_json::value::RawValue;

use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Json<Vec<Box<RawValue>>> {
    Json(state.log.documents().await)
}
