use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::task::{Level, Status, Task};

/// Task as exchanged with the server. Timestamps travel as epoch millis.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Level,
    pub importance: Level,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub due_date: DateTime<Utc>,
    pub status: Status,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl RemoteTask {
    pub fn from_task(task: &Task, pushed_at: DateTime<Utc>) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            importance: task.importance,
            due_date: task.due_date,
            status: task.status,
            created_at: task.created_at,
            updated_at: pushed_at,
        }
    }

    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            importance: self.importance,
            due_date: self.due_date,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn wire_format_uses_camel_case_and_millis() {
        let due = Utc.timestamp_millis_opt(1_705_000_000_123).unwrap();
        let created = Utc.timestamp_millis_opt(1_704_000_000_000).unwrap();
        let pushed = Utc.timestamp_millis_opt(1_704_500_000_000).unwrap();
        let mut task = Task::new("Report".to_string(), String::new(), Level::High, Level::Low, due, created);
        task.id = Some(3);

        let json = serde_json::to_value(RemoteTask::from_task(&task, pushed)).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["dueDate"], 1_705_000_000_123_i64);
        assert_eq!(json["createdAt"], 1_704_000_000_000_i64);
        assert_eq!(json["updatedAt"], 1_704_500_000_000_i64);
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["importance"], "LOW");
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn parses_server_payload() {
        let body = r#"{
            "id": 12,
            "title": "Code Review Session",
            "description": "auth module",
            "priority": "MEDIUM",
            "importance": "HIGH",
            "dueDate": 1706140800000,
            "status": "COMPLETED",
            "createdAt": 1704067200000,
            "updatedAt": 1704153600000
        }"#;
        let remote: RemoteTask = serde_json::from_str(body).unwrap();
        let task = remote.into_task();

        assert_eq!(task.id, Some(12));
        assert_eq!(task.importance, Level::High);
        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.due_date.timestamp_millis(), 1_706_140_800_000);
    }

    #[test]
    fn unsynced_task_omits_id() {
        let at = Utc.timestamp_millis_opt(0).unwrap();
        let task = Task::new("Draft".to_string(), String::new(), Level::Low, Level::Low, at, at);
        let json = serde_json::to_value(RemoteTask::from_task(&task, at)).unwrap();
        assert!(json.get("id").is_none());
    }
}
