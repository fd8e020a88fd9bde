//! Task Service - task lifecycle and the task list kept on each user

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskFields};
use crate::repository::{TaskRepository, UserRepository};

/// Task and user writes are separate store operations with no transaction,
/// so a failure between them can leave an orphaned task or a stale id in a
/// user's list. Concurrent creates for one user may drop an append.
pub struct TaskService<T: TaskRepository, U: UserRepository> {
    tasks: Arc<T>,
    users: Arc<U>,
}

impl<T: TaskRepository, U: UserRepository> TaskService<T, U> {
    pub fn new(tasks: T, users: U) -> Self {
        Self {
            tasks: Arc::new(tasks),
            users: Arc::new(users),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: Uuid) -> TaskResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskError::TaskNotFound(task_id))
    }

    /// Tasks referenced by the user's list, in collection order.
    #[instrument(skip(self))]
    pub async fn get_user_tasks(&self, user_id: Uuid) -> TaskResult<Vec<Task>> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(TaskError::UserNotFound)?;

        if user.tasks.is_empty() {
            return Ok(Vec::new());
        }

        let tasks = self.tasks.find_all().await?;
        Ok(tasks.into_iter().filter(|t| user.owns(&t.id)).collect())
    }

    /// Insert a task and append its id to the owner's list.
    ///
    /// The owner is resolved first, so an unknown user persists nothing.
    #[instrument(skip(self, fields))]
    pub async fn create_task(&self, fields: TaskFields, user_id: Uuid) -> TaskResult<Task> {
        let draft = fields.into_draft()?;

        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(TaskError::UserNotFound)?;

        let task = self.tasks.create(draft).await?;
        user.add_task(task.id);
        self.users.save(user).await?;

        tracing::info!(task_id = %task.id, "Task created for user");
        Ok(task)
    }

    /// Replace all four fields of an existing task. Never touches users.
    #[instrument(skip(self, fields))]
    pub async fn update_task(&self, fields: TaskFields, task_id: Uuid) -> TaskResult<Task> {
        let draft = fields.into_draft()?;

        self.tasks
            .update_fields(task_id, draft)
            .await?
            .ok_or(TaskError::TaskNotFound(task_id))
    }

    /// Delete a task and prune its id from the user's list.
    ///
    /// The list is pruned and saved even when the task is already gone; the
    /// missing task is reported afterwards.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: Uuid, user_id: Uuid) -> TaskResult<()> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(TaskError::UserNotFound)?;

        let existed = self.tasks.delete_by_id(task_id).await?;

        if !user.remove_task(task_id) {
            tracing::debug!(%task_id, "Task id not present in user's list");
        }
        self.users.save(user).await?;

        if !existed {
            return Err(TaskError::TaskNotFound(task_id));
        }
        Ok(())
    }
}

impl<T: TaskRepository, U: UserRepository> Clone for TaskService<T, U> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            users: Arc::clone(&self.users),
        }
    }
}
