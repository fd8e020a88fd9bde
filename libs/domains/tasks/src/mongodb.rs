//! MongoDB implementations of TaskRepository and UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc, to_bson},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskDraft, User};
use crate::repository::{TaskRepository, UserRepository};

pub const TASKS_COLLECTION: &str = "tasks";
pub const USERS_COLLECTION: &str = "users";

// Ids are stored as hyphenated strings. Serializing `Uuid` directly would
// write binary on insert (the driver's raw serializer) but strings through
// `to_bson`, and filters would never match.
fn id_filter(id: &Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

/// Only documents with string ids belong to this service.
fn listable_filter() -> Document {
    doc! { "_id": { "$type": "string" } }
}

fn parse_stored_id(raw: &str) -> TaskResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| TaskError::Internal(format!("Stored id {raw} is not a UUID")))
}

fn to_bson_date(date: &DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(date.timestamp_millis())
}

/// Stored shape of a task. `dueDate` is a BSON date so documents written by
/// other clients of the collection decode too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskDocument {
    #[serde(rename = "_id")]
    id: String,
    subject: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<String>,
    due_date: bson::DateTime,
}

impl From<&Task> for TaskDocument {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            subject: task.subject.clone(),
            description: task.description.clone(),
            priority: task.priority.clone(),
            due_date: to_bson_date(&task.due_date),
        }
    }
}

impl TryFrom<TaskDocument> for Task {
    type Error = TaskError;

    fn try_from(doc: TaskDocument) -> TaskResult<Self> {
        let id = parse_stored_id(&doc.id)?;
        let due_date = DateTime::<Utc>::from_timestamp_millis(doc.due_date.timestamp_millis())
            .ok_or_else(|| TaskError::Internal(format!("Task {id} has an out-of-range dueDate")))?;

        Ok(Task {
            id,
            subject: doc.subject,
            description: doc.description,
            priority: doc.priority,
            due_date,
        })
    }
}

/// Stored shape of the user fields this service touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    tasks: Vec<String>,
}

impl TryFrom<UserDocument> for User {
    type Error = TaskError;

    fn try_from(doc: UserDocument) -> TaskResult<Self> {
        let mut user = User::new(parse_stored_id(&doc.id)?);
        for raw in &doc.tasks {
            user.add_task(parse_stored_id(raw)?);
        }
        Ok(user)
    }
}

/// MongoDB implementation of the TaskRepository
pub struct MongoTaskRepository {
    collection: Collection<TaskDocument>,
}

impl MongoTaskRepository {
    /// ```ignore
    /// let db = client.database("taskboard");
    /// let repo = MongoTaskRepository::new(&db);
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, TASKS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<TaskDocument>(collection_name),
        }
    }

    /// `$set` document replacing the four editable fields.
    fn set_fields(draft: &TaskDraft) -> TaskResult<Document> {
        Ok(doc! {
            "$set": {
                "subject": draft.subject.as_str(),
                "description": draft.description.as_str(),
                "priority": to_bson(&draft.priority)?,
                "dueDate": to_bson_date(&draft.due_date),
            }
        })
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    #[instrument(skip(self, draft), fields(subject = %draft.subject))]
    async fn create(&self, draft: TaskDraft) -> TaskResult<Task> {
        let document = TaskDocument::from(&Task::new(draft));

        self.collection.insert_one(&document).await?;

        tracing::info!(task_id = %document.id, "Task inserted");
        // Hand back what was stored; BSON dates keep millisecond precision.
        Task::try_from(document)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        self.collection
            .find_one(id_filter(&id))
            .await?
            .map(Task::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        let cursor = self.collection.find(listable_filter()).await?;
        let documents: Vec<TaskDocument> = cursor.try_collect().await?;
        documents.into_iter().map(Task::try_from).collect()
    }

    #[instrument(skip(self, draft))]
    async fn update_fields(&self, id: Uuid, draft: TaskDraft) -> TaskResult<Option<Task>> {
        let updated = self
            .collection
            .find_one_and_update(id_filter(&id), Self::set_fields(&draft)?)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(task_id = %id, "Task updated");
        }
        updated.map(Task::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> TaskResult<bool> {
        let result = self.collection.delete_one(id_filter(&id)).await?;
        Ok(result.deleted_count > 0)
    }
}

/// MongoDB implementation of the UserRepository.
///
/// Reads only `_id` and `tasks`; writes only `tasks`.
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, USERS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<UserDocument>(collection_name),
        }
    }

    fn set_tasks(user: &User) -> Document {
        let tasks: Vec<String> = user.tasks.iter().map(Uuid::to_string).collect();
        doc! { "$set": { "tasks": tasks } }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> TaskResult<Option<User>> {
        self.collection
            .find_one(id_filter(&id))
            .await?
            .map(User::try_from)
            .transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id, task_count = user.tasks.len()))]
    async fn save(&self, user: User) -> TaskResult<User> {
        let result = self
            .collection
            .update_one(id_filter(&user.id), Self::set_tasks(&user))
            .await?;

        if result.matched_count == 0 {
            return Err(TaskError::UserNotFound);
        }
        Ok(user)
    }
}
