use tracing::{debug, info, warn};

use crate::api::classifier::Classifier;
use crate::api::gateway::RemoteGateway;
use crate::error::{NetworkError, SyncError};
use crate::model::task::Task;
use crate::repository::LocalStore;
use crate::service::reconcile::reconcile;

/// Observer for one sync run. Progress only precedes the terminal call, and
/// exactly one of `on_success` / `on_error` fires per run.
pub trait SyncListener {
    fn on_progress(&self, _message: &str) {}
    fn on_success(&self, _tasks: &[Task]) {}
    fn on_error(&self, _message: &str) {}
}

#[derive(Debug)]
pub struct PushFailure {
    pub task: Task,
    pub error: NetworkError,
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub merged: Vec<Task>,
    pub created: usize,
    pub updated: usize,
    pub failed: Vec<PushFailure>,
}

pub struct SyncService<G: RemoteGateway, S: LocalStore> {
    gateway: G,
    store: S,
    classifier: Option<Box<dyn Classifier>>,
}

impl<G: RemoteGateway, S: LocalStore> SyncService<G, S> {
    pub fn new(gateway: G, store: S) -> Self {
        Self {
            gateway,
            store,
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn sync(&self, listener: &dyn SyncListener) -> Result<SyncReport, SyncError> {
        match self.run_sync(listener).await {
            Ok(report) => {
                listener.on_success(&report.merged);
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "sync failed");
                listener.on_error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn run_sync(&self, listener: &dyn SyncListener) -> Result<SyncReport, SyncError> {
        listener.on_progress("Starting sync...");
        let local = self.store.load_all().map_err(SyncError::Store)?;

        listener.on_progress("Downloading tasks from server...");
        let remote = self.gateway.list_remote().await?;

        let reconciliation = reconcile(&local, &remote);
        let mut merged = reconciliation.merged;
        // local-only entries sit at the tail of `merged`, in push order
        let offset = merged.len() - reconciliation.push_local_only.len();
        let mut report = SyncReport::default();

        if !reconciliation.push_local_only.is_empty() {
            listener.on_progress(&format!(
                "Uploading {} local task(s)...",
                reconciliation.push_local_only.len()
            ));
        }

        for (i, task) in reconciliation.push_local_only.into_iter().enumerate() {
            match self.push(&task).await {
                Ok(stored) => {
                    if task.is_synced() {
                        report.updated += 1;
                    } else {
                        report.created += 1;
                    }
                    merged[offset + i] = stored;
                }
                Err(error) => {
                    warn!(title = %task.title, id = ?task.id, %error, "push failed, keeping local copy");
                    report.failed.push(PushFailure { task, error });
                }
            }
        }

        self.store.replace_all(&merged).map_err(SyncError::Store)?;

        info!(
            total = merged.len(),
            created = report.created,
            updated = report.updated,
            failed = report.failed.len(),
            "sync finished"
        );
        report.merged = merged;
        Ok(report)
    }

    async fn push(&self, task: &Task) -> Result<Task, NetworkError> {
        match task.id {
            None => {
                debug!(title = %task.title, "creating task on server");
                self.gateway.create_remote(task).await
            }
            Some(id) => {
                debug!(id, title = %task.title, "updating task on server");
                self.gateway.update_remote(task).await
            }
        }
    }

    /// A classifier error or silence leaves the task as it was.
    pub async fn annotate(&self, mut task: Task) -> Task {
        let Some(classifier) = &self.classifier else {
            return task;
        };
        let text = format!("{} {}", task.title, task.description);
        match classifier.classify(&text).await {
            Ok(Some(annotation)) => {
                task.description = annotation.embed(&task.description);
            }
            Ok(None) => {}
            Err(error) => {
                warn!(title = %task.title, %error, "classifier failed, saving without annotation");
            }
        }
        task
    }

    /// Saves `task` locally, then creates it remotely. When the remote call
    /// fails the local copy stays and is picked up by the next sync.
    pub async fn create_task(&self, task: Task) -> Result<Task, SyncError> {
        let task = self.annotate(task).await;
        let mut tasks = self.store.load_all().map_err(SyncError::Store)?;
        tasks.push(task.clone());
        let index = tasks.len() - 1;
        self.store.replace_all(&tasks).map_err(SyncError::Store)?;

        let created = self.gateway.create_remote(&task).await?;
        tasks[index] = created.clone();
        self.store.replace_all(&tasks).map_err(SyncError::Store)?;
        debug!(id = ?created.id, title = %created.title, "task created");
        Ok(created)
    }

    pub async fn update_task(&self, current: &Task, updated: Task) -> Result<Task, SyncError> {
        let mut tasks = self.store.load_all().map_err(SyncError::Store)?;
        let index = position_of(&tasks, current)?;
        tasks[index] = updated.clone();
        self.store.replace_all(&tasks).map_err(SyncError::Store)?;

        if !updated.is_synced() {
            return Ok(updated);
        }

        let stored = self.gateway.update_remote(&updated).await?;
        tasks[index] = stored.clone();
        self.store.replace_all(&tasks).map_err(SyncError::Store)?;
        Ok(stored)
    }

    pub async fn delete_task(&self, current: &Task) -> Result<(), SyncError> {
        let mut tasks = self.store.load_all().map_err(SyncError::Store)?;
        let index = position_of(&tasks, current)?;
        tasks.remove(index);
        self.store.replace_all(&tasks).map_err(SyncError::Store)?;

        if let Some(id) = current.id {
            self.gateway.delete_remote(id).await?;
        }
        Ok(())
    }
}

fn position_of(tasks: &[Task], current: &Task) -> Result<usize, SyncError> {
    tasks
        .iter()
        .position(|t| t == current)
        .ok_or_else(|| SyncError::Store(anyhow::anyhow!("task '{}' not found locally", current.title)))
}
