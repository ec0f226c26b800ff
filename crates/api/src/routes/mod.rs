use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod people;

/// Build the application router with all routes attached to `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(people::router())
        .with_state(state)
}
