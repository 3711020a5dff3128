//! Task file loading with XDG path support.
//!
//! The host application hands the filter engine its records as a JSON file,
//! by default at `~/.local/share/tf/tasks.json`. The file holds either a bare
//! array of tasks or an object with a `tasks` array.
//!
//! Both synchronous and asynchronous loaders are provided:
//! - `load()`, `load_or_default()` - Synchronous methods using `std::fs`
//! - `load_async()`, `load_or_default_async()` - Asynchronous methods using `tokio::fs`

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::TaskRecord;

/// Default task filename.
const TASKS_FILENAME: &str = "tasks.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "tf";

/// Errors that can occur while loading tasks.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Failed to determine XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read task file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for task store operations.
pub type Result<T> = std::result::Result<T, TaskStoreError>;

/// The accepted shapes of a task file.
#[derive(Deserialize)]
#[serde(untagged)]
enum TaskFile {
    Bare(Vec<TaskRecord>),
    Wrapped { tasks: Vec<TaskRecord> },
}

impl TaskFile {
    fn into_tasks(self) -> Vec<TaskRecord> {
        match self {
            TaskFile::Bare(tasks) | TaskFile::Wrapped { tasks } => tasks,
        }
    }
}

/// Read-only access to a task file on disk.
///
/// # Example
///
/// ```no_run
/// use task_filter_rs::TaskStore;
///
/// let store = TaskStore::new()?;
/// let tasks = store.load_or_default()?;
/// # Ok::<(), task_filter_rs::TaskStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TaskStore {
    /// Path to the task file.
    path: PathBuf,
}

impl TaskStore {
    /// Creates a new `TaskStore` with the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `TaskStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a new `TaskStore` reading from a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG path for the task file.
    ///
    /// On Unix: `~/.local/share/tf/tasks.json`
    /// On macOS: `~/Library/Application Support/tf/tasks.json`
    ///
    /// # Errors
    ///
    /// Returns `TaskStoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(TaskStoreError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(TASKS_FILENAME))
    }

    /// Returns the path to the task file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads all tasks from disk.
    ///
    /// # Errors
    ///
    /// - Returns `TaskStoreError::ReadError` if the file cannot be read.
    /// - Returns `TaskStoreError::Json` if the file is not a valid task file.
    pub fn load(&self) -> Result<Vec<TaskRecord>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| TaskStoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        self.decode(&contents)
    }

    /// Loads all tasks, returning an empty list if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `TaskStoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `TaskStoreError::Json` if the file is not a valid task file.
    pub fn load_or_default(&self) -> Result<Vec<TaskRecord>> {
        match self.load() {
            Ok(tasks) => Ok(tasks),
            Err(TaskStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Loads all tasks from disk asynchronously.
    ///
    /// This is the async equivalent of [`load()`](Self::load).
    pub async fn load_async(&self) -> Result<Vec<TaskRecord>> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| TaskStoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })?;
        self.decode(&contents)
    }

    /// Loads all tasks asynchronously, returning an empty list if the file doesn't exist.
    ///
    /// This is the async equivalent of [`load_or_default()`](Self::load_or_default).
    pub async fn load_or_default_async(&self) -> Result<Vec<TaskRecord>> {
        match self.load_async().await {
            Ok(tasks) => Ok(tasks),
            Err(TaskStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn decode(&self, contents: &str) -> Result<Vec<TaskRecord>> {
        let tasks = serde_json::from_str::<TaskFile>(contents)?.into_tasks();
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }
}
