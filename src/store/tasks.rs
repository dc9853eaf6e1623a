use std::rc::Rc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TaskflowError};
use crate::form::{TASK_TITLE_REQUIRED, TaskDraft, require_non_empty};
use crate::ids::{IdGenerator, UuidIds};
use crate::model::{Status, Task};
use crate::store::storage::{Storage, read_json, write_json};

pub const TASKS_KEY: &str = "taskflow-tasks";

/// Ordered task collection mirrored to `storage` under [`TASKS_KEY`].
///
/// Every mutation builds the next collection, writes it in full, and only
/// then replaces the in-memory copy; a failed write leaves the store as it was.
pub struct TaskStore<S> {
    storage: S,
    ids: Box<dyn IdGenerator>,
    clock: Rc<dyn Clock>,
    tasks: Vec<Task>,
}

impl<S: Storage> TaskStore<S> {
    pub fn load(storage: S) -> Result<Self> {
        Self::load_with(storage, Box::new(UuidIds), Rc::new(SystemClock))
    }

    pub fn load_with(storage: S, ids: Box<dyn IdGenerator>, clock: Rc<dyn Clock>) -> Result<Self> {
        let tasks: Vec<Task> = read_json(&storage, TASKS_KEY)?.unwrap_or_default();
        debug!(count = tasks.len(), "loaded tasks");
        Ok(Self {
            storage,
            ids,
            clock,
            tasks,
        })
    }

    /// Write the current collection back to storage.
    pub fn save(&self) -> Result<()> {
        write_json(&self.storage, TASKS_KEY, &self.tasks)
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        require_non_empty(&draft.title, TASK_TITLE_REQUIRED)?;
        let id = self.fresh_id();
        let now = self.clock.now();
        let task = Task {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: Status::Todo,
            due_date: draft.due_date,
            category: draft.category,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        };

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;
        info!(id = %task.id, "created task");
        Ok(task)
    }

    /// Replace the editable fields of task `id`, keeping its id, status, and
    /// creation time.
    pub fn update(&mut self, id: &str, draft: TaskDraft) -> Result<Task> {
        require_non_empty(&draft.title, TASK_TITLE_REQUIRED)?;
        let pos = self.position(id)?;
        let current = &self.tasks[pos];
        let task = Task {
            id: current.id.clone(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: current.status,
            due_date: draft.due_date,
            category: draft.category,
            tags: draft.tags,
            created_at: current.created_at,
            updated_at: self.stamp(current.updated_at),
        };

        let mut next = self.tasks.clone();
        next[pos] = task.clone();
        self.commit(next)?;
        info!(id, "updated task");
        Ok(task)
    }

    /// Remove task `id`. Unknown ids are a no-op and return `None`.
    pub fn delete(&mut self, id: &str) -> Result<Option<Task>> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "delete of unknown task ignored");
            return Ok(None);
        };
        let mut next = self.tasks.clone();
        let removed = next.remove(pos);
        self.commit(next)?;
        info!(id, "deleted task");
        Ok(Some(removed))
    }

    /// Flip todo <-> completed.
    pub fn toggle_status(&mut self, id: &str) -> Result<Task> {
        let pos = self.position(id)?;
        let mut task = self.tasks[pos].clone();
        task.status = task.status.toggled();
        task.updated_at = self.stamp(task.updated_at);

        let mut next = self.tasks.clone();
        next[pos] = task.clone();
        self.commit(next)?;
        info!(id, status = %task.status, "toggled task");
        Ok(task)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskflowError::TaskNotFound(id.to_string()))
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Current time, nudged forward if the clock has not moved past `previous`.
    fn stamp(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.clock.now();
        if now > previous {
            now
        } else {
            previous + Duration::milliseconds(1)
        }
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        write_json(&self.storage, TASKS_KEY, &next)?;
        self.tasks = next;
        Ok(())
    }
}
