use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::api::gateway::RemoteGateway;
use crate::api::model::RemoteTask;
use crate::error::NetworkError;
use crate::model::task::Task;

const REMOTE_FILE_NAME: &str = "remote_tasks.json";

/// Server stand-in backed by a JSON file in a shared directory.
pub struct FileRemoteGateway {
    file_path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileRemoteGateway {
    pub fn open(dir: &Path) -> Self {
        Self {
            file_path: dir.join(REMOTE_FILE_NAME),
            lock: Mutex::new(()),
        }
    }

    pub fn init(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let gateway = Self::open(dir);
        if !gateway.file_path.exists() {
            fs::write(&gateway.file_path, "[]")?;
        }
        Ok(gateway)
    }

    fn read(&self) -> Result<Vec<RemoteTask>, NetworkError> {
        let content = fs::read_to_string(&self.file_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                NetworkError::Unreachable(format!("{} is not available", self.file_path.display()))
            }
            _ => NetworkError::Unreachable(e.to_string()),
        })?;
        serde_json::from_str(&content).map_err(|e| NetworkError::Malformed(e.to_string()))
    }

    fn write(&self, tasks: &[RemoteTask]) -> Result<(), NetworkError> {
        let content =
            serde_json::to_string_pretty(tasks).map_err(|e| NetworkError::Malformed(e.to_string()))?;
        fs::write(&self.file_path, content).map_err(|e| NetworkError::Unreachable(e.to_string()))
    }

    fn with_tasks<T>(
        &self,
        f: impl FnOnce(&mut Vec<RemoteTask>) -> Result<T, NetworkError>,
    ) -> Result<T, NetworkError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| NetworkError::Unreachable("remote store lock poisoned".to_string()))?;
        let mut tasks = self.read()?;
        let out = f(&mut tasks)?;
        self.write(&tasks)?;
        Ok(out)
    }
}

#[async_trait]
impl RemoteGateway for FileRemoteGateway {
    async fn list_remote(&self) -> Result<Vec<Task>, NetworkError> {
        self.read()?
            .into_iter()
            .map(|remote| match remote.id {
                Some(_) => Ok(remote.into_task()),
                None => Err(NetworkError::Malformed(format!(
                    "server task '{}' has no id",
                    remote.title
                ))),
            })
            .collect()
    }

    async fn create_remote(&self, task: &Task) -> Result<Task, NetworkError> {
        self.with_tasks(|tasks| {
            let next_id = tasks.iter().filter_map(|t| t.id).max().unwrap_or(0) + 1;
            let mut stored = RemoteTask::from_task(task, Utc::now());
            stored.id = Some(next_id);
            tasks.push(stored.clone());
            Ok(stored.into_task())
        })
    }

    async fn update_remote(&self, task: &Task) -> Result<Task, NetworkError> {
        let id = task
            .id
            .ok_or_else(|| NetworkError::Rejected {
                status: 400,
                message: "cannot update a task without an id".to_string(),
            })?;
        self.with_tasks(|tasks| {
            let slot = tasks
                .iter_mut()
                .find(|t| t.id == Some(id))
                .ok_or(NetworkError::NotFound(id))?;
            *slot = RemoteTask::from_task(task, Utc::now());
            Ok(slot.clone().into_task())
        })
    }

    async fn delete_remote(&self, id: i64) -> Result<(), NetworkError> {
        self.with_tasks(|tasks| {
            let before = tasks.len();
            tasks.retain(|t| t.id != Some(id));
            if tasks.len() == before {
                return Err(NetworkError::NotFound(id));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Level;
    use chrono::TimeZone;

    fn draft(title: &str) -> Task {
        let at = Utc.with_ymd_and_hms(2024, 1, 12, 12, 0, 0).unwrap();
        Task::new(title.to_string(), String::new(), Level::High, Level::Low, at, at)
    }

    #[tokio::test]
    async fn missing_directory_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FileRemoteGateway::open(&dir.path().join("nowhere"));
        let err = gateway.list_remote().await.unwrap_err();
        assert!(matches!(err, NetworkError::Unreachable(_)));
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FileRemoteGateway::init(dir.path()).unwrap();

        let a = gateway.create_remote(&draft("a")).await.unwrap();
        let b = gateway.create_remote(&draft("b")).await.unwrap();

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(gateway.list_remote().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn update_and_delete_require_known_ids() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FileRemoteGateway::init(dir.path()).unwrap();
        let mut created = gateway.create_remote(&draft("a")).await.unwrap();

        created.title = "renamed".to_string();
        let updated = gateway.update_remote(&created).await.unwrap();
        assert_eq!(updated.title, "renamed");

        let ghost = draft("ghost").with_id(99);
        assert!(matches!(
            gateway.update_remote(&ghost).await,
            Err(NetworkError::NotFound(99))
        ));

        gateway.delete_remote(1).await.unwrap();
        assert!(gateway.list_remote().await.unwrap().is_empty());
        assert!(matches!(
            gateway.delete_remote(1).await,
            Err(NetworkError::NotFound(1))
        ));
    }

    #[tokio::test]
    async fn listing_rows_without_id_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FileRemoteGateway::init(dir.path()).unwrap();
        let orphan = RemoteTask::from_task(&draft("orphan"), Utc::now());
        fs::write(
            dir.path().join(REMOTE_FILE_NAME),
            serde_json::to_string(&vec![orphan]).unwrap(),
        )
        .unwrap();

        assert!(matches!(
            gateway.list_remote().await,
            Err(NetworkError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn update_without_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = FileRemoteGateway::init(dir.path()).unwrap();
        assert!(matches!(
            gateway.update_remote(&draft("a")).await,
            Err(NetworkError::Rejected { status: 400, .. })
        ));
    }
}
