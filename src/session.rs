//! Form -> store -> notification flow for the task and project views.
//!
//! Each submit validates the form, applies the mutation (which persists),
//! and reports the outcome to the notifier. Any failure of a mutation is
//! reported as an error notification and returned; a failed validation
//! writes nothing.

use crate::error::{Result, TaskflowError};
use crate::form::{ProjectForm, TaskForm};
use crate::model::{Project, Status, Task};
use crate::notify::Notifier;
use crate::query::{self, ProjectQuery, ProjectStats, TaskQuery, TaskStats};
use crate::store::projects::ProjectStore;
use crate::store::storage::Storage;
use crate::store::tasks::TaskStore;

pub struct TaskSession<S> {
    store: TaskStore<S>,
    notifier: Box<dyn Notifier>,
}

pub struct ProjectSession<S> {
    store: ProjectStore<S>,
    notifier: Box<dyn Notifier>,
}

fn report_failure<T>(notifier: &dyn Notifier, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        notifier.error(&err.to_string());
    }
    result
}

impl<S: Storage> TaskSession<S> {
    pub fn new(store: TaskStore<S>, notifier: Box<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn get(&self, id: &str) -> Result<&Task> {
        self.store
            .get(id)
            .ok_or_else(|| TaskflowError::TaskNotFound(id.to_string()))
    }

    pub fn create(&mut self, form: &TaskForm) -> Result<Task> {
        let result = form.validate().and_then(|draft| self.store.create(draft));
        let task = report_failure(self.notifier.as_ref(), result)?;
        self.notifier.success("Task created successfully!");
        Ok(task)
    }

    /// Start an edit buffer pre-filled from task `id`.
    pub fn edit_form(&self, id: &str) -> Result<TaskForm> {
        Ok(TaskForm::from_task(self.get(id)?))
    }

    pub fn update(&mut self, id: &str, form: &TaskForm) -> Result<Task> {
        let result = form.validate().and_then(|draft| self.store.update(id, draft));
        let task = report_failure(self.notifier.as_ref(), result)?;
        self.notifier.success("Task updated successfully!");
        Ok(task)
    }

    pub fn delete(&mut self, id: &str) -> Result<Option<Task>> {
        let removed = report_failure(self.notifier.as_ref(), self.store.delete(id))?;
        if removed.is_some() {
            self.notifier.success("Task deleted successfully!");
        }
        Ok(removed)
    }

    pub fn toggle(&mut self, id: &str) -> Result<Task> {
        let task = report_failure(self.notifier.as_ref(), self.store.toggle_status(id))?;
        self.notifier.success(match task.status {
            Status::Completed => "Task completed!",
            Status::Todo => "Task reopened!",
        });
        Ok(task)
    }

    pub fn visible(&self, query: &TaskQuery) -> Vec<&Task> {
        query::project_tasks(self.store.list(), query, self.store.now())
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::collect(self.store.list(), self.store.now())
    }
}

impl<S: Storage> ProjectSession<S> {
    pub fn new(store: ProjectStore<S>, notifier: Box<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &ProjectStore<S> {
        &self.store
    }

    pub fn get(&self, id: u64) -> Result<&Project> {
        self.store.get(id).ok_or(TaskflowError::ProjectNotFound(id))
    }

    pub fn create(&mut self, form: &ProjectForm) -> Result<Project> {
        let result = form.validate().and_then(|draft| self.store.create(draft));
        let project = report_failure(self.notifier.as_ref(), result)?;
        self.notifier.success("Project created successfully!");
        Ok(project)
    }

    pub fn edit_form(&self, id: u64) -> Result<ProjectForm> {
        Ok(ProjectForm::from_project(self.get(id)?))
    }

    pub fn update(&mut self, id: u64, form: &ProjectForm) -> Result<Project> {
        let result = form.validate().and_then(|draft| self.store.update(id, draft));
        let project = report_failure(self.notifier.as_ref(), result)?;
        self.notifier.success("Project updated successfully!");
        Ok(project)
    }

    pub fn delete(&mut self, id: u64) -> Result<Option<Project>> {
        let removed = report_failure(self.notifier.as_ref(), self.store.delete(id))?;
        if removed.is_some() {
            self.notifier.success("Project deleted successfully!");
        }
        Ok(removed)
    }

    pub fn visible(&self, query: &ProjectQuery) -> Vec<&Project> {
        query::project_projects(self.store.list(), query)
    }

    pub fn stats(&self) -> ProjectStats {
        ProjectStats::collect(self.store.list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use chrono::{Duration, TimeZone, Utc};

    use crate::clock::FixedClock;
    use crate::ids::SequentialIds;
    use crate::model::Priority;
    use crate::notify::{Level, RecordingNotifier};
    use crate::query::TaskFilter;
    use crate::store::storage::MemoryStorage;
    use crate::store::tasks::TASKS_KEY;

    fn task_session() -> (TaskSession<MemoryStorage>, MemoryStorage, RecordingNotifier) {
        let storage = MemoryStorage::new();
        let clock = Rc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
        ));
        let store = TaskStore::load_with(
            storage.clone(),
            Box::new(SequentialIds::default()),
            clock,
        )
        .unwrap();
        let recorder = RecordingNotifier::new();
        (
            TaskSession::new(store, Box::new(recorder.clone())),
            storage,
            recorder,
        )
    }

    #[test]
    fn invalid_form_notifies_and_writes_nothing() {
        let (mut session, storage, recorder) = task_session();
        let err = session.create(&TaskForm::new("")).unwrap_err();
        assert!(matches!(err, TaskflowError::Validation(_)));
        assert_eq!(recorder.messages(), vec!["Task title is required!"]);
        assert_eq!(recorder.last().unwrap().level, Level::Error);
        assert!(storage.get(TASKS_KEY).unwrap().is_none());
    }

    #[test]
    fn overdue_high_priority_scenario() {
        let (mut session, _, recorder) = task_session();
        let today = session.store().today();
        let mut form = TaskForm::new("Pay bills");
        form.priority = Priority::High;
        form.due_date = Some(today - Duration::days(1));
        let task = session.create(&form).unwrap();

        let overdue = TaskQuery {
            filter: TaskFilter::Overdue,
            ..TaskQuery::default()
        };
        let high = TaskQuery {
            filter: TaskFilter::High,
            ..TaskQuery::default()
        };
        assert_eq!(session.visible(&overdue).len(), 1);
        assert_eq!(session.visible(&high).len(), 1);

        session.toggle(&task.id).unwrap();
        assert!(session.visible(&overdue).is_empty());
        assert_eq!(session.visible(&high).len(), 1);

        assert_eq!(
            recorder.messages(),
            vec!["Task created successfully!", "Task completed!"]
        );
        assert_eq!(session.stats().completed, 1);
        assert_eq!(session.stats().overdue, 0);
    }

    #[test]
    fn edit_flow_uses_prefilled_form() {
        let (mut session, _, recorder) = task_session();
        let mut form = TaskForm::new("Groceries");
        form.tags = "home".into();
        let task = session.create(&form).unwrap();

        let mut edit = session.edit_form(&task.id).unwrap();
        edit.description = "milk, eggs".into();
        let updated = session.update(&task.id, &edit).unwrap();
        assert_eq!(updated.title, "Groceries");
        assert_eq!(updated.tags, vec!["home"]);
        assert_eq!(updated.description, "milk, eggs");
        assert_eq!(recorder.last().unwrap().message, "Task updated successfully!");
    }

    #[test]
    fn store_failures_are_notified() {
        let (mut session, _, recorder) = task_session();
        let err = session.toggle("ghost").unwrap_err();
        assert!(matches!(err, TaskflowError::TaskNotFound(_)));
        let err = session.update("ghost", &TaskForm::new("Renamed")).unwrap_err();
        assert_eq!(err.code(), "task_not_found");

        assert_eq!(
            recorder.messages(),
            vec!["task ghost not found", "task ghost not found"]
        );
        assert_eq!(recorder.last().unwrap().level, Level::Error);
    }

    #[test]
    fn missing_delete_is_silent_noop() {
        let (mut session, _, recorder) = task_session();
        session.create(&TaskForm::new("Keep me")).unwrap();
        assert!(session.delete("ghost").unwrap().is_none());
        assert_eq!(session.store().list().len(), 1);
        assert_eq!(recorder.messages(), vec!["Task created successfully!"]);
    }

    #[test]
    fn project_session_round_trip() {
        let clock = Rc::new(FixedClock::new(Utc::now()));
        let store = ProjectStore::load_with(MemoryStorage::new(), clock, true).unwrap();
        let recorder = RecordingNotifier::new();
        let mut session = ProjectSession::new(store, Box::new(recorder.clone()));

        assert!(session.create(&ProjectForm::new(" ")).is_err());
        assert!(session.update(99, &ProjectForm::new("Nowhere")).is_err());
        let created = session.create(&ProjectForm::new("Garden")).unwrap();
        let mut edit = session.edit_form(created.id).unwrap();
        edit.description = "raised beds".into();
        session.update(created.id, &edit).unwrap();
        session.delete(created.id).unwrap();

        assert_eq!(
            recorder.messages(),
            vec![
                "Project name is required",
                "project 99 not found",
                "Project created successfully!",
                "Project updated successfully!",
                "Project deleted successfully!",
            ]
        );
        assert_eq!(session.stats().total, 3);
    }
}
