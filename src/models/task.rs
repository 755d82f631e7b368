use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is done.
    Completed,
}

/// Input structure for creating a task.
///
/// `status` and `due_date` are required alongside `title`; an unknown status
/// value is rejected at deserialization and surfaces as a validation error
/// through the JSON error handler.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// Optional, at most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: TaskStatus,

    /// Calendar date, e.g. "2025-04-18".
    pub due_date: NaiveDate,
}

/// Partial input for updating a task. Fields left out of the request body
/// deserialize to `None` and keep their stored values.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    pub due_date: Option<NaiveDate>,
}

/// A task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    /// Identifier of the user who owns the task. Immutable.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` and the owner's `user_id`,
    /// with a fresh UUID and both timestamps set to now.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status,
            due_date: input.due_date,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 18).unwrap()
    }

    #[test]
    fn test_task_creation() {
        let input = TaskInput {
            title: "Write report".to_string(),
            description: Some("Quarterly numbers".to_string()),
            status: TaskStatus::Pending,
            due_date: due_date(),
        };

        let task = Task::new(input, 7);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.user_id, 7);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_input_validation() {
        let empty_title = TaskInput {
            title: "".to_string(),
            description: None,
            status: TaskStatus::Pending,
            due_date: due_date(),
        };
        assert!(empty_title.validate().is_err());

        let long_title = TaskInput {
            title: "a".repeat(256),
            description: None,
            status: TaskStatus::InProgress,
            due_date: due_date(),
        };
        assert!(long_title.validate().is_err());

        let long_description = TaskInput {
            title: "Valid title".to_string(),
            description: Some("b".repeat(1001)),
            status: TaskStatus::Completed,
            due_date: due_date(),
        };
        assert!(long_description.validate().is_err());

        let valid = TaskInput {
            title: "Valid title".to_string(),
            description: Some("Fine".to_string()),
            status: TaskStatus::Completed,
            due_date: due_date(),
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_status_serde_membership() {
        // The three canonical statuses round-trip through their wire names.
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"pending\"").unwrap(),
            TaskStatus::Pending
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"in_progress\"").unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"completed\""
        );

        // Anything outside the enum is rejected outright.
        assert!(serde_json::from_str::<TaskStatus>("\"archived\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"done\"").is_err());
    }

    #[test]
    fn test_task_update_defaults_to_no_changes() {
        let update: TaskUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.status.is_none());
        assert!(update.due_date.is_none());
        assert!(update.validate().is_ok());
    }
}
