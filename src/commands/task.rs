use std::path::Path;

use chrono::NaiveDate;

use crate::commands::notifier_for;
use crate::error::Result;
use crate::form::TaskForm;
use crate::model::Priority;
use crate::output::{self, Format};
use crate::query::{TaskFilter, TaskQuery, TaskSort};
use crate::store::repo::Repo;

/// Field overrides for `task edit`; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct TaskEdits {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<NaiveDate>,
    pub clear_due: bool,
    pub category: Option<String>,
    pub tags: Option<String>,
}

impl TaskEdits {
    fn apply(self, form: &mut TaskForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if self.clear_due {
            form.due_date = None;
        } else if let Some(due) = self.due {
            form.due_date = Some(due);
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(tags) = self.tags {
            form.tags = tags;
        }
    }
}

pub fn add(repo_root: &Path, form: TaskForm, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let mut session = repo.tasks(notifier_for(format))?;
    let task = session.create(&form)?;
    output::print_task(&task, session.store().today(), format)
}

pub fn edit(repo_root: &Path, id: &str, edits: TaskEdits, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let mut session = repo.tasks(notifier_for(format))?;
    let mut form = session.edit_form(id)?;
    edits.apply(&mut form);
    let task = session.update(id, &form)?;
    output::print_task(&task, session.store().today(), format)
}

pub fn toggle(repo_root: &Path, id: &str, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let mut session = repo.tasks(notifier_for(format))?;
    let task = session.toggle(id)?;
    output::print_task(&task, session.store().today(), format)
}

pub fn remove(repo_root: &Path, id: &str, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let mut session = repo.tasks(notifier_for(format))?;
    let removed = session.delete(id)?;
    output::print_removed(removed.as_ref(), &format!("task {id}"), format)
}

pub fn show(repo_root: &Path, id: &str, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let session = repo.tasks(notifier_for(format))?;
    output::print_task(session.get(id)?, session.store().today(), format)
}

pub fn list(
    repo_root: &Path,
    filter: TaskFilter,
    search: Option<String>,
    sort: Option<TaskSort>,
    format: Format,
) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let session = repo.tasks(notifier_for(format))?;
    let query = TaskQuery {
        filter,
        search: search.unwrap_or_default(),
        sort: sort.unwrap_or(repo.config.default_task_sort),
    };
    let visible = session.visible(&query);
    output::print_tasks(&visible, session.store().today(), format)
}

pub fn stats(repo_root: &Path, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let session = repo.tasks(notifier_for(format))?;
    output::print_task_stats(&session.stats(), format)
}
