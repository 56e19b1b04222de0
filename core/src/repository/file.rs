use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::model::task::Task;
use crate::repository::traits::LocalStore;

const DEFAULT_FILE_NAME: &str = "tasks.json";

#[derive(Clone)]
pub struct FileTaskStore {
    file_path: PathBuf,
}

impl FileTaskStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("creating data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<Task>::new())?;
            writer.flush()?;
        }

        Ok(FileTaskStore { file_path: path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }
}

pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".smarttasks"))
}

impl LocalStore for FileTaskStore {
    fn load_all(&self) -> Result<Vec<Task>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("opening {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)?;
        Ok(tasks)
    }

    fn replace_all(&self, tasks: &[Task]) -> Result<()> {
        // write beside the target, then rename over it
        let tmp = self.file_path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, tasks)?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.file_path)?;
        Ok(())
    }
}
