use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Variant order matters: `Low < Medium < High`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Default for Level {
    fn default() -> Self {
        Level::Medium
    }
}

impl Level {
    pub fn points(self) -> i64 {
        match self {
            Level::High => 3,
            Level::Medium => 2,
            Level::Low => 1,
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "h" | "high" => Some(Level::High),
            "m" | "med" | "medium" => Some(Level::Medium),
            "l" | "low" => Some(Level::Low),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pending,
    Completed,
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Server-issued id. `None` until the remote store acknowledges a create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Level,
    pub importance: Level,
    pub due_date: DateTime<Utc>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        title: String,
        description: String,
        priority: Level,
        importance: Level,
        due_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title,
            description,
            priority,
            importance,
            due_date,
            status: Status::default(),
            created_at,
        }
    }

    pub fn is_synced(&self) -> bool {
        self.id.is_some()
    }

    pub fn with_id(&self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    pub fn toggle_status(&mut self) {
        self.status = match self.status {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        };
    }
}
