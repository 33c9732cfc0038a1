//! A store that keeps its tasks in memory, and optionally in a local JSON file

use std::io::Write;
use std::path::{Path, PathBuf};
#[cfg(any(test, feature = "mock_behaviour"))]
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::store::{Store, StoreError};
use crate::task::{TaskId, TaskRecord};
#[cfg(any(test, feature = "mock_behaviour"))]
use crate::mock_behaviour::MockBehaviour;


/// A [`Store`] that works on an in-memory copy of its tasks, and writes them to its backing file (if any) on commit
#[derive(Debug)]
pub struct LocalStore {
    backing_file: Option<PathBuf>,

    /// What the backing file contains
    committed: Vec<TaskRecord>,
    /// `committed` plus the staged changes
    working: Vec<TaskRecord>,

    #[cfg(any(test, feature = "mock_behaviour"))]
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Default, Deserialize)]
struct StoredData {
    tasks: Vec<TaskRecord>,
}

#[derive(Serialize)]
struct StoredDataRef<'a> {
    tasks: &'a [TaskRecord],
}

impl LocalStore {
    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self::with_contents(None, Vec::new())
    }

    /// An empty store, that will be saved to `path` on commit
    pub fn new(path: &Path) -> Self {
        Self::with_contents(Some(PathBuf::from(path)), Vec::new())
    }

    /// Initialize a store from the content of a valid backing file.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path)?;
        let data: StoredData = serde_json::from_reader(std::io::BufReader::new(file))?;
        log::debug!("Loaded {} tasks from {:?}", data.tasks.len(), path);

        Ok(Self::with_contents(Some(PathBuf::from(path)), data.tasks))
    }

    /// Load the backing file if it exists, or start an empty store that will create it
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            log::info!("No store at {:?} yet, starting an empty one", path);
            Ok(Self::new(path))
        }
    }

    fn with_contents(backing_file: Option<PathBuf>, tasks: Vec<TaskRecord>) -> Self {
        Self {
            backing_file,
            working: tasks.clone(),
            committed: tasks,
            #[cfg(any(test, feature = "mock_behaviour"))]
            mock_behaviour: None,
        }
    }

    #[cfg(any(test, feature = "mock_behaviour"))]
    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    #[cfg(any(test, feature = "mock_behaviour"))]
    fn mocked<F>(&self, check: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), StoreError>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(mb) => {
                let mut mb = mb.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                check(&mut mb)
            },
        }
    }

    pub fn backing_file(&self) -> Option<&Path> {
        self.backing_file.as_deref()
    }

    /// The tasks as of the last successful commit
    pub fn committed_tasks(&self) -> &[TaskRecord] {
        &self.committed
    }

    /// Whether some changes have been staged but not committed
    pub fn has_pending_changes(&self) -> bool {
        self.working != self.committed
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.working.iter().position(|task| task.id() == id)
    }
}

/// Write the tasks to a temporary file next to `path`, then move it over `path`.
/// `path` is either left untouched or entirely replaced
fn save_to_file(path: &Path, tasks: &[TaskRecord]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut temp, &StoredDataRef { tasks })?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| StoreError::Io(err.error))?;
    Ok(())
}

#[async_trait]
impl Store for LocalStore {
    async fn query_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<TaskRecord>, StoreError> {
        #[cfg(any(test, feature = "mock_behaviour"))]
        self.mocked(|mb| mb.can_query())?;

        Ok(self.working.iter()
            .filter(|task| from <= task.due_day() && task.due_day() <= to)
            .cloned()
            .collect()
        )
    }

    async fn get(&self, id: &TaskId) -> Result<Option<TaskRecord>, StoreError> {
        #[cfg(any(test, feature = "mock_behaviour"))]
        self.mocked(|mb| mb.can_get())?;

        Ok(self.position(id).map(|index| self.working[index].clone()))
    }

    async fn insert(&mut self, task: TaskRecord) -> Result<(), StoreError> {
        #[cfg(any(test, feature = "mock_behaviour"))]
        self.mocked(|mb| mb.can_insert())?;

        if self.position(task.id()).is_some() {
            return Err(StoreError::DuplicateId(task.id().clone()));
        }
        self.working.push(task);
        Ok(())
    }

    async fn update(&mut self, task: TaskRecord) -> Result<(), StoreError> {
        #[cfg(any(test, feature = "mock_behaviour"))]
        self.mocked(|mb| mb.can_update())?;

        match self.position(task.id()) {
            None => Err(StoreError::Missing(task.id().clone())),
            Some(index) => {
                self.working[index] = task;
                Ok(())
            },
        }
    }

    async fn delete(&mut self, id: &TaskId) -> Result<(), StoreError> {
        #[cfg(any(test, feature = "mock_behaviour"))]
        self.mocked(|mb| mb.can_delete())?;

        match self.position(id) {
            None => Err(StoreError::Missing(id.clone())),
            Some(index) => {
                self.working.remove(index);
                Ok(())
            },
        }
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        #[cfg(any(test, feature = "mock_behaviour"))]
        self.mocked(|mb| mb.can_commit())?;

        if let Some(path) = &self.backing_file {
            save_to_file(path, &self.working)?;
            log::debug!("Saved {} tasks to {:?}", self.working.len(), path);
        }
        self.committed = self.working.clone();
        Ok(())
    }

    fn rollback(&mut self) {
        self.working = self.committed.clone();
    }
}
