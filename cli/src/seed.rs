use chrono::{DateTime, Duration, Utc};
use smarttasks_core::{Level, Task};

pub fn sample_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let entries = [
        (
            "Complete Project Proposal",
            "Quarterly proposal for the mobile app initiative: budget, timeline, resources.",
            Level::High,
            Level::High,
            3,
        ),
        (
            "Client Meeting Preparation",
            "Slides and documents for Friday's client meeting.",
            Level::High,
            Level::Medium,
            4,
        ),
        (
            "Code Review Session",
            "Review the authentication module and send feedback. [IMP:0.8][URG:0.4]",
            Level::Medium,
            Level::High,
            14,
        ),
        (
            "Update Documentation",
            "Add the latest endpoint changes and examples to the API docs.",
            Level::High,
            Level::Low,
            7,
        ),
        (
            "Team Building Event Planning",
            "Pick a venue and activities for next month's team event.",
            Level::Low,
            Level::Medium,
            30,
        ),
        (
            "Organize Office Supplies",
            "Inventory and reorder supplies.",
            Level::Low,
            Level::Low,
            45,
        ),
    ];

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (title, description, priority, importance, due_in_days))| {
            Task::new(
                title.to_string(),
                description.to_string(),
                priority,
                importance,
                now + Duration::days(due_in_days),
                now - Duration::minutes(i as i64),
            )
        })
        .collect()
}
