use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::clock::SystemClock;
use crate::config::{self, Config};
use crate::error::{Result, TaskflowError};
use crate::ids::UuidIds;
use crate::notify::Notifier;
use crate::session::{ProjectSession, TaskSession};
use crate::store::files::{DATA_DIR, FileStorage};
use crate::store::projects::ProjectStore;
use crate::store::tasks::TaskStore;

/// An opened `.taskflow` directory and its settings.
pub struct Repo {
    pub storage: FileStorage,
    pub config: Config,
}

impl Repo {
    pub fn open(base: &Path) -> Result<Self> {
        let storage = FileStorage::open(base)?;
        let config = Config::load(storage.root())?;
        Ok(Self { storage, config })
    }

    pub fn tasks(&self, notifier: Box<dyn Notifier>) -> Result<TaskSession<FileStorage>> {
        let store = TaskStore::load_with(
            self.storage.clone(),
            Box::new(UuidIds),
            Rc::new(SystemClock),
        )?;
        Ok(TaskSession::new(store, notifier))
    }

    pub fn projects(&self, notifier: Box<dyn Notifier>) -> Result<ProjectSession<FileStorage>> {
        let store = ProjectStore::load_with(
            self.storage.clone(),
            Rc::new(SystemClock),
            self.config.seed_projects,
        )?;
        Ok(ProjectSession::new(store, notifier))
    }
}

/// Nearest ancestor of `start` (inclusive) containing a `.taskflow` directory.
pub fn find_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(DATA_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// `TASKFLOW_DIR` if set, otherwise the nearest ancestor of the current
/// directory that has been initialized.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Some(dir) = config::dir_override() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir()?;
    find_root_from(&cwd).ok_or(TaskflowError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::TaskForm;
    use crate::notify::SilentNotifier;
    use crate::query::ProjectSort;
    use tempfile::tempdir;

    #[test]
    fn finds_root_from_nested_directory() {
        let dir = tempdir().unwrap();
        FileStorage::init(dir.path()).unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_root_from(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn no_root_without_init() {
        let dir = tempdir().unwrap();
        assert_eq!(find_root_from(dir.path()), None);
    }

    #[test]
    fn open_respects_seed_setting() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::init(dir.path()).unwrap();
        let config = Config {
            seed_projects: false,
            default_project_sort: ProjectSort::Progress,
            ..Config::default()
        };
        config.save(storage.root()).unwrap();

        let repo = Repo::open(dir.path()).unwrap();
        assert_eq!(repo.config, config);
        let projects = repo.projects(Box::new(SilentNotifier)).unwrap();
        assert!(projects.store().list().is_empty());
    }

    #[test]
    fn sessions_share_the_directory() {
        let dir = tempdir().unwrap();
        FileStorage::init(dir.path()).unwrap();
        let repo = Repo::open(dir.path()).unwrap();

        let mut tasks = repo.tasks(Box::new(SilentNotifier)).unwrap();
        tasks.create(&TaskForm::new("Persisted")).unwrap();

        let reopened = Repo::open(dir.path()).unwrap();
        let tasks = reopened.tasks(Box::new(SilentNotifier)).unwrap();
        assert_eq!(tasks.store().list()[0].title, "Persisted");
        assert!(dir.path().join(".taskflow/taskflow-tasks.json").exists());
    }
}
