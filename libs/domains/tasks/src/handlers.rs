use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{
    AppJson, AppQuery, ErrorResponse, FieldViolation, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, NotFoundResponse, ServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{
    CreateTaskRequest, DeleteTaskRequest, MessageResponse, Task, TaskEnvelope, TaskFields,
    TaskIdQuery, TaskListEnvelope, UpdateTaskRequest, UserIdQuery,
};
use crate::repository::{TaskRepository, UserRepository};
use crate::service::TaskService;
use crate::validation::parse_optional_id;

/// OpenAPI documentation for the task API
#[derive(OpenApi)]
#[openapi(
    paths(get_task, get_user_tasks, create_task, update_task, delete_task),
    components(
        schemas(
            Task,
            TaskFields,
            CreateTaskRequest,
            UpdateTaskRequest,
            DeleteTaskRequest,
            TaskEnvelope,
            TaskListEnvelope,
            MessageResponse,
            ErrorResponse,
            FieldViolation
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ServerErrorResponse
        )
    ),
    tags(
        (name = "Tasks", description = "Task lifecycle and per-user task lists")
    )
)]
pub struct ApiDoc;

type SharedService<T, U> = State<Arc<TaskService<T, U>>>;

/// Create the task router
pub fn router<T, U>(service: TaskService<T, U>) -> Router
where
    T: TaskRepository + 'static,
    U: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/getTask", get(get_task::<T, U>))
        .route("/getUserTasks", get(get_user_tasks::<T, U>))
        .route("/createTask", post(create_task::<T, U>))
        .route("/updateTask", post(update_task::<T, U>))
        .route("/deleteTask", post(delete_task::<T, U>))
        .with_state(shared_service)
}

/// Get one task
#[utoipa::path(
    get,
    path = "/getTask",
    tag = "Tasks",
    params(TaskIdQuery),
    responses(
        (status = 200, description = "Task found", body = TaskEnvelope),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_task<T: TaskRepository, U: UserRepository>(
    State(service): SharedService<T, U>,
    AppQuery(query): AppQuery<TaskIdQuery>,
) -> TaskResult<Json<TaskEnvelope>> {
    let task_id = parse_optional_id(query.task_id.as_deref())?.ok_or(TaskError::MissingTaskId)?;
    let task = service.get_task(task_id).await?;
    Ok(Json(TaskEnvelope { task }))
}

/// List the tasks referenced by a user
#[utoipa::path(
    get,
    path = "/getUserTasks",
    tag = "Tasks",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Tasks owned by the user", body = TaskListEnvelope),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_user_tasks<T: TaskRepository, U: UserRepository>(
    State(service): SharedService<T, U>,
    AppQuery(query): AppQuery<UserIdQuery>,
) -> TaskResult<Json<TaskListEnvelope>> {
    let user_id = parse_optional_id(query.user_id.as_deref())?.ok_or(TaskError::UserNotFound)?;
    let tasks = service.get_user_tasks(user_id).await?;
    Ok(Json(TaskListEnvelope { tasks }))
}

/// Create a task for a user
#[utoipa::path(
    post,
    path = "/createTask",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Task created", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn create_task<T: TaskRepository, U: UserRepository>(
    State(service): SharedService<T, U>,
    ValidatedJson(input): ValidatedJson<CreateTaskRequest>,
) -> TaskResult<Json<MessageResponse>> {
    let user_id = parse_optional_id(input.user_id.as_deref())?.ok_or(TaskError::UserNotFound)?;
    service.create_task(input.fields, user_id).await?;
    Ok(Json(MessageResponse::new("Task was created")))
}

/// Replace the fields of a task
#[utoipa::path(
    post,
    path = "/updateTask",
    tag = "Tasks",
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_task<T: TaskRepository, U: UserRepository>(
    State(service): SharedService<T, U>,
    ValidatedJson(input): ValidatedJson<UpdateTaskRequest>,
) -> TaskResult<Json<MessageResponse>> {
    let task_id = parse_optional_id(input.task_id.as_deref())?.ok_or(TaskError::MissingTaskId)?;
    service.update_task(input.fields, task_id).await?;
    Ok(Json(MessageResponse::new("Task was updated")))
}

/// Delete a task and remove it from the user's list
#[utoipa::path(
    post,
    path = "/deleteTask",
    tag = "Tasks",
    request_body = DeleteTaskRequest,
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_task<T: TaskRepository, U: UserRepository>(
    State(service): SharedService<T, U>,
    AppJson(input): AppJson<DeleteTaskRequest>,
) -> TaskResult<Json<MessageResponse>> {
    let task_id = parse_optional_id(input.task_id.as_deref())?.ok_or(TaskError::MissingTaskId)?;
    let user_id = parse_optional_id(input.user_id.as_deref())?.ok_or(TaskError::UserNotFound)?;
    service.delete_task(task_id, user_id).await?;
    Ok(Json(MessageResponse::new(format!("Task {} deleted", task_id))))
}
