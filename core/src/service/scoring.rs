use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::annotation::Annotation;
use crate::model::task::Task;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const URGENT_WITHIN_DAYS: i64 = 3;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub importance: i64,
    pub priority: i64,
    pub due: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            importance: 3,
            priority: 2,
            due: 2,
        }
    }
}

/// Whole days until `due`, floored so a partial day counts as the nearer day.
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (due - now).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// 0..=3 bucket for how soon a task is due. Overdue tasks land in 3.
pub fn urgency_bucket(task: &Task, now: DateTime<Utc>) -> i64 {
    match days_until(task.due_date, now) {
        d if d <= 3 => 3,
        d if d <= 7 => 2,
        d if d <= 30 => 1,
        _ => 0,
    }
}

pub fn score(task: &Task, now: DateTime<Utc>, weights: &Weights) -> i64 {
    let bonus = Annotation::parse(&task.description)
        .map(|a| a.bonus())
        .unwrap_or(0);

    // weights are unbounded config values
    weights
        .importance
        .saturating_mul(task.importance.points())
        .saturating_add(weights.priority.saturating_mul(task.priority.points()))
        .saturating_add(weights.due.saturating_mul(urgency_bucket(task, now)))
        .saturating_add(bonus)
}

pub fn is_urgent(task: &Task, now: DateTime<Utc>) -> bool {
    task.due_date - now <= Duration::days(URGENT_WITHIN_DAYS)
}
