use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TaskflowError};
use crate::form::{PROJECT_NAME_REQUIRED, ProjectDraft, require_non_empty};
use crate::model::{Project, ProjectStatus};
use crate::store::storage::{Storage, read_json, write_json};

pub const PROJECTS_KEY: &str = "taskflow-projects";

/// Ordered project collection mirrored to `storage` under [`PROJECTS_KEY`].
///
/// `task_count` and `completed_tasks` are carried as stored; nothing here
/// derives them from the task list.
pub struct ProjectStore<S> {
    storage: S,
    clock: Rc<dyn Clock>,
    projects: Vec<Project>,
}

/// The three example projects written on first load.
pub fn example_projects(now: DateTime<Utc>) -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Website Redesign".into(),
            description: "Complete overhaul of company website".into(),
            status: ProjectStatus::Active,
            due_date: NaiveDate::from_ymd_opt(2024, 2, 15),
            color: "#6366f1".into(),
            task_count: 12,
            completed_tasks: 8,
            created_at: now,
        },
        Project {
            id: 2,
            name: "Mobile App Development".into(),
            description: "Build iOS and Android mobile application".into(),
            status: ProjectStatus::Active,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 30),
            color: "#ec4899".into(),
            task_count: 25,
            completed_tasks: 15,
            created_at: now,
        },
        Project {
            id: 3,
            name: "Marketing Campaign".into(),
            description: "Q1 marketing campaign planning and execution".into(),
            status: ProjectStatus::Completed,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            color: "#10b981".into(),
            task_count: 8,
            completed_tasks: 8,
            created_at: now,
        },
    ]
}

impl<S: Storage> ProjectStore<S> {
    pub fn load(storage: S) -> Result<Self> {
        Self::load_with(storage, Rc::new(SystemClock), true)
    }

    /// Load the stored projects. When nothing is stored and `seed` is set,
    /// the example projects are written immediately.
    pub fn load_with(storage: S, clock: Rc<dyn Clock>, seed: bool) -> Result<Self> {
        let projects = match read_json::<_, Vec<Project>>(&storage, PROJECTS_KEY)? {
            Some(projects) => projects,
            None if seed => {
                let projects = example_projects(clock.now());
                write_json(&storage, PROJECTS_KEY, &projects)?;
                info!(count = projects.len(), "no stored projects, wrote examples");
                projects
            }
            None => Vec::new(),
        };
        debug!(count = projects.len(), "loaded projects");
        Ok(Self {
            storage,
            clock,
            projects,
        })
    }

    pub fn save(&self) -> Result<()> {
        write_json(&self.storage, PROJECTS_KEY, &self.projects)
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn create(&mut self, draft: ProjectDraft) -> Result<Project> {
        require_non_empty(&draft.name, PROJECT_NAME_REQUIRED)?;
        let project = Project {
            id: self.next_id(),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
            color: draft.color,
            task_count: 0,
            completed_tasks: 0,
            created_at: self.clock.now(),
        };

        let mut next = self.projects.clone();
        next.push(project.clone());
        self.commit(next)?;
        info!(id = project.id, "created project");
        Ok(project)
    }

    /// Replace name, description, status, due date, and color of project `id`.
    pub fn update(&mut self, id: u64, draft: ProjectDraft) -> Result<Project> {
        require_non_empty(&draft.name, PROJECT_NAME_REQUIRED)?;
        let pos = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(TaskflowError::ProjectNotFound(id))?;
        let project = Project {
            name: draft.name,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
            color: draft.color,
            ..self.projects[pos].clone()
        };

        let mut next = self.projects.clone();
        next[pos] = project.clone();
        self.commit(next)?;
        info!(id, "updated project");
        Ok(project)
    }

    /// Remove project `id`. Unknown ids are a no-op and return `None`.
    pub fn delete(&mut self, id: u64) -> Result<Option<Project>> {
        let Some(pos) = self.projects.iter().position(|p| p.id == id) else {
            debug!(id, "delete of unknown project ignored");
            return Ok(None);
        };
        let mut next = self.projects.clone();
        let removed = next.remove(pos);
        self.commit(next)?;
        info!(id, "deleted project");
        Ok(Some(removed))
    }

    fn next_id(&self) -> u64 {
        self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    fn commit(&mut self, next: Vec<Project>) -> Result<()> {
        write_json(&self.storage, PROJECTS_KEY, &next)?;
        self.projects = next;
        Ok(())
    }
}
