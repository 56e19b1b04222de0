use async_trait::async_trait;

use crate::error::NetworkError;
use crate::model::task::Task;

#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn list_remote(&self) -> Result<Vec<Task>, NetworkError>;

    /// Returns the stored task carrying its server-assigned id.
    async fn create_remote(&self, task: &Task) -> Result<Task, NetworkError>;

    async fn update_remote(&self, task: &Task) -> Result<Task, NetworkError>;

    async fn delete_remote(&self, id: i64) -> Result<(), NetworkError>;
}
