use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Model served by the `people` routes.
    people_model: String,
    port: u16,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        people_model: state.people.model_name().to_string(),
        port: state.config.port,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
