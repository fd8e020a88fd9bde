//! API routes module

pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// All API routes. `axum_helpers::create_router` nests these under `/api`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/task", tasks::router(state))
        .merge(health::router(state.clone()))
}
