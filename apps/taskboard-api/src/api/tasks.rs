//! Wires the tasks domain to MongoDB.

use axum::Router;
use domain_tasks::{MongoTaskRepository, MongoUserRepository, TaskService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = TaskService::new(
        MongoTaskRepository::new(&state.db),
        MongoUserRepository::new(&state.db),
    );

    handlers::router(service)
}
