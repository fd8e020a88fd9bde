//! In-memory repositories for tests and local runs without MongoDB.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskDraft, User};
use crate::repository::{TaskRepository, UserRepository};

/// Keeps tasks in insertion order, like a collection scan would.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, draft: TaskDraft) -> TaskResult<Task> {
        let task = Task::new(draft);
        self.tasks.write().await.push(task.clone());

        tracing::info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn update_fields(&self, id: Uuid, draft: TaskDraft) -> TaskResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.apply(draft);
            task.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() < before)
    }
}

/// User records are owned by the authentication service, so this repository
/// is seeded with [`InMemoryUserRepository::insert`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> TaskResult<User> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or(TaskError::UserNotFound)?;
        stored.tasks = user.tasks;
        Ok(stored.clone())
    }
}
