use crate::model::task::Task;
use anyhow::Result;

/// Local snapshot of the task list. It is replaced wholesale after a sync.
pub trait LocalStore {
    fn load_all(&self) -> Result<Vec<Task>>;
    fn replace_all(&self, tasks: &[Task]) -> Result<()>;
}
