use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Task entity as stored in the `tasks` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub subject: String,
    pub description: String,
    /// Free-form priority label, never "Default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub due_date: DateTime<Utc>,
}

impl Task {
    pub fn new(draft: TaskDraft) -> Self {
        Self {
            id: Uuid::now_v7(),
            subject: draft.subject,
            description: draft.description,
            priority: draft.priority,
            due_date: draft.due_date,
        }
    }

    /// Overwrite the four editable fields, keeping the id.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.subject = draft.subject;
        self.description = draft.description;
        self.priority = draft.priority;
        self.due_date = draft.due_date;
    }
}

/// The slice of a user record this service reads and writes.
///
/// Users are created and owned by the authentication service; only `tasks`
/// is ever written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Ids of the tasks this user owns, in insertion order
    #[serde(default)]
    pub tasks: Vec<Uuid>,
}

impl User {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            tasks: Vec::new(),
        }
    }

    pub fn add_task(&mut self, task_id: Uuid) {
        self.tasks.push(task_id);
    }

    /// Removes the first occurrence of `task_id`. Returns whether one was found.
    pub fn remove_task(&mut self, task_id: Uuid) -> bool {
        match self.tasks.iter().position(|id| *id == task_id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn owns(&self, task_id: &Uuid) -> bool {
        self.tasks.contains(task_id)
    }
}

/// Raw task fields as received from a client, before validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    /// 1 to 80 characters
    #[serde(default)]
    pub subject: Option<String>,
    /// 1 to 255 characters
    #[serde(default)]
    pub description: Option<String>,
    /// Any label except "Default"
    #[serde(default)]
    pub priority: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD
    #[serde(default)]
    #[schema(example = "2030-01-01")]
    pub due_date: Option<String>,
}

/// Validated task fields, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub subject: String,
    pub description: String,
    pub priority: Option<String>,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(flatten)]
    pub fields: TaskFields,
    /// Owner of the new task
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(flatten)]
    pub fields: TaskFields,
    #[serde(default)]
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskRequest {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TaskIdQuery {
    /// Task to fetch
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// User whose tasks to list
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskEnvelope {
    pub task: Task,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskListEnvelope {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_with_mongo_id_and_camel_case() {
        let task = Task::new(TaskDraft {
            subject: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            priority: Some("High".to_string()),
            due_date: DateTime::parse_from_rfc3339("2030-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        });

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["_id"], task.id.to_string());
        assert!(json.get("dueDate").is_some());
        assert!(json.get("due_date").is_none());
    }

    #[test]
    fn test_task_accepts_plain_id_alias() {
        let json = r#"{"id":"0190c4c2-6f1e-7c4a-9d1e-3b1f0a2c5d6e","subject":"s","description":"d","priority":"Low","dueDate":"2030-01-01T00:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.to_string(), "0190c4c2-6f1e-7c4a-9d1e-3b1f0a2c5d6e");
    }

    #[test]
    fn test_remove_task_drops_first_occurrence_only() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let mut user = User::new(Uuid::now_v7());
        user.tasks = vec![a, b, a];

        assert!(user.remove_task(a));
        assert_eq!(user.tasks, vec![b, a]);

        assert!(!user.remove_task(Uuid::now_v7()));
        assert_eq!(user.tasks.len(), 2);
    }

    #[test]
    fn test_user_without_tasks_field_deserializes_empty() {
        let user: User =
            serde_json::from_str(r#"{"_id":"0190c4c2-6f1e-7c4a-9d1e-3b1f0a2c5d6e","email":"a@b.c"}"#)
                .unwrap();
        assert!(user.tasks.is_empty());
    }

    #[test]
    fn test_create_request_flattens_fields() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{"subject":"s","description":"d","dueDate":"2030-01-01","userId":"u1"}"#,
        )
        .unwrap();
        assert_eq!(req.fields.subject.as_deref(), Some("s"));
        assert_eq!(req.fields.due_date.as_deref(), Some("2030-01-01"));
        assert!(req.fields.priority.is_none());
        assert_eq!(req.user_id.as_deref(), Some("u1"));
    }
}
