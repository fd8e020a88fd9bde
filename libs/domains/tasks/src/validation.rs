//! Payload rules for task create and update.
//!
//! Rules run in a fixed field order (subject, description, priority, dueDate)
//! and the first failure is the one reported to clients as `message`.

use axum_helpers::{FieldViolation, ValidationRules};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;
use validator::ValidateLength;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTaskRequest, TaskDraft, TaskFields, UpdateTaskRequest};

pub const SUBJECT_MAX_CHARS: u64 = 80;
pub const DESCRIPTION_MAX_CHARS: u64 = 255;
/// Placeholder label some clients send for "no choice made"
pub const RESERVED_PRIORITY: &str = "Default";

pub const SUBJECT_FIELD: &str = "subject";
pub const DESCRIPTION_FIELD: &str = "description";
pub const PRIORITY_FIELD: &str = "priority";
pub const DUE_DATE_FIELD: &str = "dueDate";

pub const SUBJECT_MESSAGE: &str =
    "Subject field shouldn't be empty, and its length should be a maximum of 80 characters";
pub const DESCRIPTION_MESSAGE: &str =
    "Description field shouldn't be empty, and its length should be a maximum of 255 characters";
pub const PRIORITY_MESSAGE: &str = "Priority must not be \"Default\"";
pub const DUE_DATE_MESSAGE: &str = "Due date field shouldn't be empty";
pub const INVALID_DUE_DATE_MESSAGE: &str = "Due date must be a valid date";

fn within_length(value: Option<&String>, max: u64) -> bool {
    value.is_some_and(|v| v.validate_length(Some(1), Some(max), None))
}

impl ValidationRules for TaskFields {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if !within_length(self.subject.as_ref(), SUBJECT_MAX_CHARS) {
            violations.push(FieldViolation::new(
                SUBJECT_FIELD,
                SUBJECT_MESSAGE,
                &self.subject,
            ));
        }

        if !within_length(self.description.as_ref(), DESCRIPTION_MAX_CHARS) {
            violations.push(FieldViolation::new(
                DESCRIPTION_FIELD,
                DESCRIPTION_MESSAGE,
                &self.description,
            ));
        }

        if self.priority.as_deref() == Some(RESERVED_PRIORITY) {
            violations.push(FieldViolation::new(
                PRIORITY_FIELD,
                PRIORITY_MESSAGE,
                &self.priority,
            ));
        }

        if self.due_date.as_deref().is_none_or(str::is_empty) {
            violations.push(FieldViolation::new(
                DUE_DATE_FIELD,
                DUE_DATE_MESSAGE,
                &self.due_date,
            ));
        }

        violations
    }
}

impl ValidationRules for CreateTaskRequest {
    fn violations(&self) -> Vec<FieldViolation> {
        self.fields.violations()
    }
}

impl ValidationRules for UpdateTaskRequest {
    fn violations(&self) -> Vec<FieldViolation> {
        self.fields.violations()
    }
}

impl TaskFields {
    /// Check every rule, then parse the due date.
    pub fn into_draft(self) -> TaskResult<TaskDraft> {
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(TaskError::Validation(violations));
        }

        // The rules above guarantee these are present.
        let (Some(subject), Some(description), Some(raw_due_date)) =
            (self.subject, self.description, self.due_date)
        else {
            return Err(TaskError::Internal(
                "validated task fields are incomplete".to_string(),
            ));
        };

        Ok(TaskDraft {
            subject,
            description,
            priority: self.priority,
            due_date: parse_due_date(&raw_due_date)?,
        })
    }
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_due_date(raw: &str) -> TaskResult<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| TaskError::InvalidDueDate(raw.to_string()))
}

/// Parse an optional id from a request. Absent or blank ids yield `None`.
pub fn parse_optional_id(raw: Option<&str>) -> TaskResult<Option<Uuid>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| TaskError::InvalidId(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn valid_fields() -> TaskFields {
        TaskFields {
            subject: Some("Write report".to_string()),
            description: Some("Quarterly numbers for the board".to_string()),
            priority: Some("High".to_string()),
            due_date: Some("2030-01-01".to_string()),
        }
    }

    #[test]
    fn test_valid_fields_pass() {
        assert!(valid_fields().violations().is_empty());
    }

    #[test]
    fn test_subject_length_boundary() {
        let mut fields = valid_fields();
        fields.subject = Some("a".repeat(80));
        assert!(fields.violations().is_empty());

        fields.subject = Some("a".repeat(81));
        let violations = fields.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, SUBJECT_FIELD);
        assert_eq!(violations[0].message, SUBJECT_MESSAGE);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut fields = valid_fields();
        fields.subject = Some("é".repeat(80));
        assert!(fields.violations().is_empty());
    }

    #[test]
    fn test_description_length_boundary() {
        let mut fields = valid_fields();
        fields.description = Some("d".repeat(255));
        assert!(fields.violations().is_empty());

        fields.description = Some("d".repeat(256));
        assert_eq!(fields.violations()[0].message, DESCRIPTION_MESSAGE);
    }

    #[test]
    fn test_reserved_priority_rejected() {
        let mut fields = valid_fields();
        fields.priority = Some("Default".to_string());
        let violations = fields.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, PRIORITY_MESSAGE);
    }

    #[test]
    fn test_missing_priority_allowed() {
        let mut fields = valid_fields();
        fields.priority = None;
        assert!(fields.violations().is_empty());
    }

    #[test]
    fn test_missing_or_empty_due_date_rejected() {
        let mut fields = valid_fields();
        fields.due_date = None;
        assert_eq!(fields.violations()[0].message, DUE_DATE_MESSAGE);

        fields.due_date = Some(String::new());
        assert_eq!(fields.violations()[0].message, DUE_DATE_MESSAGE);
    }

    #[test]
    fn test_first_failure_follows_field_order() {
        let fields = TaskFields {
            subject: Some("ok".to_string()),
            description: None,
            priority: Some("Default".to_string()),
            due_date: None,
        };
        let violations = fields.violations();
        let order: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(order, vec![DESCRIPTION_FIELD, PRIORITY_FIELD, DUE_DATE_FIELD]);
        assert_eq!(violations[0].message, DESCRIPTION_MESSAGE);
    }

    #[test]
    fn test_empty_payload_reports_subject_first() {
        let violations = TaskFields::default().violations();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0].field, SUBJECT_FIELD);
        assert_eq!(violations[0].value, serde_json::Value::Null);
    }

    #[test]
    fn test_into_draft_parses_date_only() {
        let draft = valid_fields().into_draft().unwrap();
        assert_eq!(draft.due_date.year(), 2030);
        assert_eq!(draft.due_date.hour(), 0);
        assert_eq!(draft.priority.as_deref(), Some("High"));
    }

    #[test]
    fn test_into_draft_parses_rfc3339_with_offset() {
        let mut fields = valid_fields();
        fields.due_date = Some("2030-06-15T10:30:00+02:00".to_string());
        let draft = fields.into_draft().unwrap();
        assert_eq!(draft.due_date.hour(), 8);
    }

    #[test]
    fn test_into_draft_rejects_unparseable_date() {
        let mut fields = valid_fields();
        fields.due_date = Some("next tuesday".to_string());
        assert!(matches!(
            fields.into_draft(),
            Err(TaskError::InvalidDueDate(raw)) if raw == "next tuesday"
        ));
    }

    #[test]
    fn test_into_draft_reports_violations() {
        assert!(matches!(
            TaskFields::default().into_draft(),
            Err(TaskError::Validation(v)) if v.len() == 3
        ));
    }

    #[test]
    fn test_parse_optional_id() {
        assert!(parse_optional_id(None).unwrap().is_none());
        assert!(parse_optional_id(Some("  ")).unwrap().is_none());

        let id = Uuid::now_v7();
        assert_eq!(parse_optional_id(Some(&id.to_string())).unwrap(), Some(id));

        assert!(matches!(
            parse_optional_id(Some("not-a-uuid")),
            Err(TaskError::InvalidId(raw)) if raw == "not-a-uuid"
        ));
    }

    #[test]
    fn test_object_id_is_not_a_task_id() {
        // 24-hex ids issued by the previous auth service are not UUIDs.
        assert!(matches!(
            parse_optional_id(Some("507f1f77bcf86cd799439011")),
            Err(TaskError::InvalidId(raw)) if raw == "507f1f77bcf86cd799439011"
        ));
    }
}
