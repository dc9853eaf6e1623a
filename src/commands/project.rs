use std::path::Path;

use chrono::NaiveDate;

use crate::commands::notifier_for;
use crate::error::Result;
use crate::form::ProjectForm;
use crate::model::ProjectStatus;
use crate::output::{self, Format};
use crate::query::{ProjectFilter, ProjectQuery, ProjectSort};
use crate::store::repo::Repo;

/// Field overrides for `project edit`; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ProjectEdits {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub due: Option<NaiveDate>,
    pub clear_due: bool,
    pub color: Option<String>,
}

impl ProjectEdits {
    fn apply(self, form: &mut ProjectForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
        if self.clear_due {
            form.due_date = None;
        } else if let Some(due) = self.due {
            form.due_date = Some(due);
        }
        if let Some(color) = self.color {
            form.color = color;
        }
    }
}

pub fn add(repo_root: &Path, form: ProjectForm, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let mut session = repo.projects(notifier_for(format))?;
    let project = session.create(&form)?;
    output::print_project(&project, session.store().today(), format)
}

pub fn edit(repo_root: &Path, id: u64, edits: ProjectEdits, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let mut session = repo.projects(notifier_for(format))?;
    let mut form = session.edit_form(id)?;
    edits.apply(&mut form);
    let project = session.update(id, &form)?;
    output::print_project(&project, session.store().today(), format)
}

pub fn remove(repo_root: &Path, id: u64, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let mut session = repo.projects(notifier_for(format))?;
    let removed = session.delete(id)?;
    output::print_removed(removed.as_ref(), &format!("project {id}"), format)
}

pub fn show(repo_root: &Path, id: u64, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let session = repo.projects(notifier_for(format))?;
    output::print_project(session.get(id)?, session.store().today(), format)
}

pub fn list(
    repo_root: &Path,
    filter: ProjectFilter,
    search: Option<String>,
    sort: Option<ProjectSort>,
    format: Format,
) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let session = repo.projects(notifier_for(format))?;
    let query = ProjectQuery {
        filter,
        search: search.unwrap_or_default(),
        sort: sort.unwrap_or(repo.config.default_project_sort),
    };
    let visible = session.visible(&query);
    output::print_projects(&visible, session.store().today(), format)
}

pub fn stats(repo_root: &Path, format: Format) -> Result<()> {
    let repo = Repo::open(repo_root)?;
    let session = repo.projects(notifier_for(format))?;
    output::print_project_stats(&session.stats(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_override_only_given_fields() {
        let mut form = ProjectForm::new("Garden");
        form.color = "#10b981".into();
        ProjectEdits {
            status: Some(ProjectStatus::OnHold),
            due: NaiveDate::from_ymd_opt(2026, 6, 1),
            ..ProjectEdits::default()
        }
        .apply(&mut form);
        assert_eq!(form.name, "Garden");
        assert_eq!(form.color, "#10b981");
        assert_eq!(form.status, ProjectStatus::OnHold);
        assert_eq!(form.due_date, NaiveDate::from_ymd_opt(2026, 6, 1));
    }
}
