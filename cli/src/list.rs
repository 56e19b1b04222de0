use chrono::{DateTime, Local, Utc};
use smarttasks_core::{Status, TaskDto};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Imp")]
    importance: String,
    #[tabled(rename = "Pri")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Score")]
    score: i64,
    #[tabled(rename = "Status")]
    status: String,
}

fn due_label(due: DateTime<Utc>, urgent: bool, status: Status) -> String {
    let local: DateTime<Local> = DateTime::from(due);
    let date = local.format("%Y-%m-%d").to_string();
    if urgent && status == Status::Pending {
        format!("{} URGENT", date)
    } else {
        date
    }
}

pub fn show_tasks(dtos: &[TaskDto], include_completed: bool) {
    let rows: Vec<TaskRow> = dtos
        .iter()
        .enumerate()
        .filter(|(_, d)| include_completed || d.status == Status::Pending)
        .map(|(i, d)| TaskRow {
            index: i + 1,
            id: d.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            title: d.title.clone(),
            importance: format!("{:?}", d.importance),
            priority: format!("{:?}", d.priority),
            due: due_label(d.due_date, d.is_urgent, d.status),
            score: d.score,
            status: format!("{:?}", d.status),
        })
        .collect();

    if rows.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    println!("{}", table);
}
