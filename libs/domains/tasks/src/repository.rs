use async_trait::async_trait;
use uuid::Uuid;

use crate::error::TaskResult;
use crate::models::{Task, TaskDraft, User};

/// Repository trait for Task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task with a fresh id
    async fn create(&self, draft: TaskDraft) -> TaskResult<Task>;

    /// Get a task by ID
    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    /// Every task, in collection order
    async fn find_all(&self) -> TaskResult<Vec<Task>>;

    /// Replace the editable fields in a single store operation.
    ///
    /// Returns the updated task, or `None` when no task has this id.
    async fn update_fields(&self, id: Uuid, draft: TaskDraft) -> TaskResult<Option<Task>>;

    /// Delete a task by ID. Returns whether a task was removed.
    async fn delete_by_id(&self, id: Uuid) -> TaskResult<bool>;
}

/// Repository trait for the task list kept on user records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<User>>;

    /// Persist the user's task list. Other fields of the record are left alone.
    async fn save(&self, user: User) -> TaskResult<User>;
}
