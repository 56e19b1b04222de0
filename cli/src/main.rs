mod list;
mod seed;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use chrono::{Local, Utc};
use clap::Parser;
use smarttasks_core::{
    parse_due, Config, FileRemoteGateway, FileTaskStore, KeywordClassifier, Level, LocalStore,
    Overrides, SyncError, SyncListener, SyncService, Task, TaskDto,
};

#[derive(Parser)]
#[command(name = "smarttasks")]
#[command(about = "Prioritized task list with offline-first sync", long_about = None)]
struct Cli {
    /// Path to config file (default: `<config dir>/smarttasks/config.toml`).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the local task snapshot.
    #[arg(long, global = true, env = "SMARTTASKS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory standing in for the remote server.
    #[arg(long, global = true, env = "SMARTTASKS_REMOTE_DIR")]
    remote_dir: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn", env = "SMARTTASKS_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a task (usage: add "Write report" --due fri --importance high)
    Add {
        title: String,
        /// today, tomorrow, eow, +3d, +2w, fri, YYYY-MM-DD [HH:MM]
        #[arg(short, long, default_value = "+7d")]
        due: String,
        #[arg(short, long, default_value = "medium")]
        priority: String,
        #[arg(short, long, default_value = "medium")]
        importance: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Only save locally; push on next sync.
        #[arg(long)]
        offline: bool,
        /// Tag the description with keyword-based importance/urgency.
        #[arg(long)]
        classify: bool,
    },
    /// List tasks, highest ranked first
    List {
        /// Include completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Toggle a task between pending and completed (number from `list --all`)
    Toggle { number: usize },
    /// Delete a task (number from `list --all`)
    Delete { number: usize },
    /// Reconcile the local snapshot with the remote store
    Sync,
    /// Create the remote directory if it does not exist
    RemoteInit,
    /// Add a handful of demo tasks locally
    Seed,
}

struct ConsoleListener;

impl SyncListener for ConsoleListener {
    fn on_progress(&self, message: &str) {
        println!("{}", message);
    }

    fn on_success(&self, tasks: &[Task]) {
        println!("Sync successful! {} task(s) on this device.", tasks.len());
    }

    fn on_error(&self, message: &str) {
        eprintln!("Sync failed: {}", message);
    }
}

fn parse_level(input: &str) -> Result<Level> {
    Level::parse(input).ok_or_else(|| anyhow!("Unknown level '{}' (use low, medium or high)", input))
}

/// Looks up the task shown as `number` by `list --all`.
fn pick(tasks: &[Task], config: &Config, number: usize) -> Result<Task> {
    let ranked = smarttasks_core::rank(tasks, Utc::now(), &config.weights);
    number
        .checked_sub(1)
        .and_then(|i| ranked.get(i))
        .cloned()
        .ok_or_else(|| anyhow!("No task number {} (have {})", number, ranked.len()))
}

/// Network failures after a local write are reported but not fatal.
fn report_offline(result: Result<(), SyncError>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(SyncError::Network(e)) => {
            println!("Saved locally; server not updated ({}). Run `sync` later.", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(&Overrides {
        config_path: cli.config.clone(),
        data_dir: cli.data_dir.clone(),
        remote_dir: cli.remote_dir.clone(),
    })?;
    tracing::debug!(?config, "configuration loaded");

    let store = FileTaskStore::new(Some(config.data_dir.clone()))?;
    let service = SyncService::new(FileRemoteGateway::open(&config.remote_dir), store);

    match cli.command.unwrap_or(Commands::List { all: false }) {
        Commands::Add {
            title,
            due,
            priority,
            importance,
            description,
            offline,
            classify,
        } => {
            if title.trim().is_empty() {
                bail!("Task title is required.");
            }
            let now = Utc::now();
            let task = Task::new(
                title,
                description,
                parse_level(&priority)?,
                parse_level(&importance)?,
                parse_due(&due, &Local::now())?,
                now,
            );
            let service = if classify {
                service.with_classifier(KeywordClassifier)
            } else {
                service
            };

            if offline {
                let task = service.annotate(task).await;
                let mut tasks = service.store().load_all()?;
                tasks.push(task.clone());
                service.store().replace_all(&tasks)?;
                println!("Task added locally: {}", task.title);
            } else {
                let result = service.create_task(task.clone()).await.map(|created| {
                    println!("Task added: {} (ID: {})", created.title, created.id.unwrap_or_default());
                });
                report_offline(result)?;
            }
        }
        Commands::List { all } => {
            let tasks = service.store().load_all()?;
            let dtos = TaskDto::ranked(&tasks, Utc::now(), &config.weights);
            list::show_tasks(&dtos, all);
        }
        Commands::Toggle { number } => {
            let tasks = service.store().load_all()?;
            let current = pick(&tasks, &config, number)?;
            let mut updated = current.clone();
            updated.toggle_status();
            println!("{}: {:?} -> {:?}", current.title, current.status, updated.status);
            report_offline(service.update_task(&current, updated).await.map(|_| ()))?;
        }
        Commands::Delete { number } => {
            let tasks = service.store().load_all()?;
            let current = pick(&tasks, &config, number)?;
            println!("Deleting: {}", current.title);
            report_offline(service.delete_task(&current).await)?;
        }
        Commands::Sync => {
            let sync_result = service.sync(&ConsoleListener).await;
            if let Ok(report) = &sync_result {
                println!(
                    "Created {}, updated {}, failed {}.",
                    report.created,
                    report.updated,
                    report.failed.len()
                );
                for failure in &report.failed {
                    println!("  not pushed: {} ({})", failure.task.title, failure.error);
                }
            }
            // the listener already printed the failure
            if let Err(SyncError::Store(e)) = sync_result {
                return Err(e);
            }
        }
        Commands::RemoteInit => {
            FileRemoteGateway::init(&config.remote_dir)?;
            println!("Remote store ready at {}", config.remote_dir.display());
        }
        Commands::Seed => {
            let mut tasks = service.store().load_all()?;
            let samples = seed::sample_tasks(Utc::now());
            let added = samples.len();
            tasks.extend(samples);
            service.store().replace_all(&tasks)?;
            println!("Added {} demo task(s).", added);
        }
    }
    Ok(())
}
