use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::model::task::Task;
use crate::service::scoring::{score, Weights};

/// Order between two already-scored tasks: score desc, due date asc,
/// creation time asc.
pub fn compare(a: (&Task, i64), b: (&Task, i64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| a.0.due_date.cmp(&b.0.due_date))
        .then_with(|| a.0.created_at.cmp(&b.0.created_at))
}

pub fn rank(tasks: &[Task], now: DateTime<Utc>, weights: &Weights) -> Vec<Task> {
    rank_scored(tasks, now, weights)
        .into_iter()
        .map(|(t, _)| t)
        .collect()
}

pub fn rank_scored(tasks: &[Task], now: DateTime<Utc>, weights: &Weights) -> Vec<(Task, i64)> {
    let mut scored: Vec<(&Task, i64)> = tasks
        .iter()
        .map(|t| (t, score(t, now, weights)))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| compare(*a, *b));

    scored.into_iter().map(|(t, s)| (t.clone(), s)).collect()
}
