//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "Task management backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/api/task", api = domain_tasks::ApiDoc)
    ),
    tags(
        (name = "Tasks", description = "Task lifecycle and per-user task lists")
    )
)]
pub struct ApiDoc;
