use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

use crate::model::annotation::Annotation;
use crate::model::task::{Task, Level, Status};
use crate::service::ranking::rank_scored;
use crate::service::scoring::{days_until, is_urgent, urgency_bucket, Weights};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskDto {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub priority: Level,
    pub importance: Level,
    pub due_date: DateTime<Utc>,
    pub status: Status,
    pub created_at: DateTime<Utc>,

    pub score: i64,
    pub urgency_bucket: i64,
    pub days_until_due: i64,
    pub is_urgent: bool,
    pub annotation: Option<(f64, f64)>,
}

impl TaskDto {
    pub fn from_entity(task: Task, score: i64, now: DateTime<Utc>) -> Self {
        let annotation = Annotation::parse(&task.description).map(|a| (a.importance, a.urgency));
        Self {
            urgency_bucket: urgency_bucket(&task, now),
            days_until_due: days_until(task.due_date, now),
            is_urgent: is_urgent(&task, now),
            annotation,
            score,
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            importance: task.importance,
            due_date: task.due_date,
            status: task.status,
            created_at: task.created_at,
        }
    }

    pub fn ranked(tasks: &[Task], now: DateTime<Utc>, weights: &Weights) -> Vec<Self> {
        rank_scored(tasks, now, weights)
            .into_iter()
            .map(|(t, score)| Self::from_entity(t, score, now))
            .collect()
    }
}
