//! Edit buffers for create/update flows.
//!
//! A form holds raw user input. `validate` is the only way to turn it into a
//! draft the stores accept; it trims text, splits the comma-separated tag
//! field, and rejects an empty title or name.

use chrono::NaiveDate;

use crate::error::{Result, TaskflowError};
use crate::model::{Priority, Project, ProjectStatus, Task};

pub const DEFAULT_PROJECT_COLOR: &str = "#6366f1";

pub const TASK_TITLE_REQUIRED: &str = "Task title is required!";
pub const PROJECT_NAME_REQUIRED: &str = "Project name is required";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: String,
    /// Comma-separated, e.g. `"home, errands"`.
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
    pub color: String,
}

/// Fail with `message` unless `value` has non-whitespace content.
pub fn require_non_empty(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TaskflowError::Validation(message.to_string()));
    }
    Ok(())
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

impl TaskForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Pre-fill the buffer from an existing task for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date,
            category: task.category.clone().unwrap_or_default(),
            tags: task.tags.join(", "),
        }
    }

    pub fn validate(&self) -> Result<TaskDraft> {
        require_non_empty(&self.title, TASK_TITLE_REQUIRED)?;
        let category = self.category.trim();
        Ok(TaskDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority,
            due_date: self.due_date,
            category: (!category.is_empty()).then(|| category.to_string()),
            tags: split_tags(&self.tags),
        })
    }
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            status: ProjectStatus::Active,
            due_date: None,
            color: DEFAULT_PROJECT_COLOR.to_string(),
        }
    }
}

impl ProjectForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            due_date: project.due_date,
            color: project.color.clone(),
        }
    }

    pub fn validate(&self) -> Result<ProjectDraft> {
        require_non_empty(&self.name, PROJECT_NAME_REQUIRED)?;
        let color = self.color.trim();
        Ok(ProjectDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            due_date: self.due_date,
            color: if color.is_empty() {
                DEFAULT_PROJECT_COLOR.to_string()
            } else {
                color.to_string()
            },
        })
    }
}
