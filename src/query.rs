//! Filtering, searching, and sorting of in-memory task and project lists.
//!
//! Everything here is a pure function of its inputs; the current time is
//! passed in rather than read from the system so results are reproducible.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{Priority, Project, ProjectStatus, Status, Task};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
    High,
    Overdue,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
pub enum TaskSort {
    #[default]
    DueDate,
    Priority,
    Created,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
pub enum ProjectFilter {
    #[default]
    All,
    Active,
    Completed,
    OnHold,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
pub enum ProjectSort {
    #[default]
    Name,
    DueDate,
    Progress,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    pub search: String,
    pub sort: TaskSort,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub filter: ProjectFilter,
    pub search: String,
    pub sort: ProjectSort,
}

impl TaskFilter {
    pub fn matches(self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.status == Status::Completed,
            Self::Pending => task.status != Status::Completed,
            Self::High => task.priority == Priority::High,
            Self::Overdue => task.is_overdue(now),
        }
    }
}

impl TaskSort {
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::DueDate => undated_last(a.due_date, b.due_date),
            Self::Priority => b.priority.rank().cmp(&a.priority.rank()),
            Self::Created => b.created_at.cmp(&a.created_at),
        }
    }
}

impl ProjectFilter {
    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Active => project.status == ProjectStatus::Active,
            Self::Completed => project.status == ProjectStatus::Completed,
            Self::OnHold => project.status == ProjectStatus::OnHold,
        }
    }
}

impl ProjectSort {
    pub fn compare(self, a: &Project, b: &Project) -> Ordering {
        match self {
            Self::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            Self::DueDate => undated_last(a.due_date, b.due_date),
            Self::Progress => b.progress().cmp(&a.progress()),
        }
    }
}

/// Ascending by date; anything without a date goes after everything with one.
fn undated_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Lowercased search text, or `None` when the query is empty. Whitespace is
/// part of the query: `"bill "` does not match `"Pay bills"`.
fn normalized_needle(search: &str) -> Option<String> {
    (!search.is_empty()).then(|| search.to_lowercase())
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive match against title, description, category, and tags.
/// `needle` must already be lowercased.
pub fn task_matches_search(task: &Task, needle: &str) -> bool {
    contains(&task.title, needle)
        || contains(&task.description, needle)
        || task.category.as_deref().is_some_and(|c| contains(c, needle))
        || task.tags.iter().any(|tag| contains(tag, needle))
}

/// Case-insensitive match against name and description.
/// `needle` must already be lowercased.
pub fn project_matches_search(project: &Project, needle: &str) -> bool {
    contains(&project.name, needle) || contains(&project.description, needle)
}

/// Filter, search, and sort `tasks` for display. Ties keep their input order.
pub fn project_tasks<'a>(
    tasks: &'a [Task],
    query: &TaskQuery,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    let needle = normalized_needle(&query.search);
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| query.filter.matches(t, now))
        .filter(|t| needle.as_deref().is_none_or(|n| task_matches_search(t, n)))
        .collect();
    visible.sort_by(|a, b| query.sort.compare(a, b));
    visible
}

/// Filter, search, and sort `projects` for display. Ties keep their input order.
pub fn project_projects<'a>(projects: &'a [Project], query: &ProjectQuery) -> Vec<&'a Project> {
    let needle = normalized_needle(&query.search);
    let mut visible: Vec<&Project> = projects
        .iter()
        .filter(|p| query.filter.matches(p))
        .filter(|p| needle.as_deref().is_none_or(|n| project_matches_search(p, n)))
        .collect();
    visible.sort_by(|a, b| query.sort.compare(a, b));
    visible
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl TaskStats {
    pub fn collect(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let completed = tasks.iter().filter(|t| t.is_completed()).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
            overdue: tasks.iter().filter(|t| t.is_overdue(now)).count(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub on_hold: usize,
}

impl ProjectStats {
    pub fn collect(projects: &[Project]) -> Self {
        let count = |status| projects.iter().filter(|p| p.status == status).count();
        Self {
            total: projects.len(),
            active: count(ProjectStatus::Active),
            completed: count(ProjectStatus::Completed),
            on_hold: count(ProjectStatus::OnHold),
        }
    }
}

/// How close a due date is, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    Today,
    Tomorrow,
    Later,
}

impl Urgency {
    pub fn of(due: NaiveDate, today: NaiveDate) -> Self {
        match (due - today).num_days() {
            d if d < 0 => Self::Overdue,
            0 => Self::Today,
            1 => Self::Tomorrow,
            _ => Self::Later,
        }
    }
}

/// Human label for a due date: `Today`, `Tomorrow`, `Yesterday`, or `Mar 05, 2026`.
pub fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    match (due - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => due.format("%b %d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap()
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, 12, 0, 0).unwrap()
    }

    fn task(id: &str, priority: Priority, due: Option<i64>) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            description: String::new(),
            priority,
            status: Status::Todo,
            due_date: due.map(|d| today() + Duration::days(d)),
            category: None,
            tags: vec![],
            created_at: at(1),
            updated_at: at(1),
        }
    }

    fn project(id: u64, name: &str, status: ProjectStatus, counts: (u32, u32)) -> Project {
        Project {
            id,
            name: name.into(),
            description: String::new(),
            status,
            due_date: None,
            color: "#6366f1".into(),
            task_count: counts.0,
            completed_tasks: counts.1,
            created_at: at(1),
        }
    }

    fn ids<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn all_filter_with_empty_search_keeps_everything() {
        let tasks = vec![
            task("a", Priority::Low, None),
            task("b", Priority::High, Some(2)),
        ];
        let query = TaskQuery::default();
        assert_eq!(project_tasks(&tasks, &query, now()).len(), 2);
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let mut bills = task("bills", Priority::Low, None);
        bills.title = "Pay bills".into();
        let mut spaced = task("spaced", Priority::Low, None);
        spaced.title = "Pay bill now".into();
        let tasks = vec![bills, spaced];

        let query = TaskQuery {
            search: "BILL ".into(),
            ..TaskQuery::default()
        };
        assert_eq!(ids(&project_tasks(&tasks, &query, now())), vec!["spaced"]);

        let blank = TaskQuery {
            search: " ".into(),
            ..TaskQuery::default()
        };
        assert_eq!(project_tasks(&tasks, &blank, now()).len(), 2);
    }

    #[test]
    fn overdue_excludes_completed_undated_and_future() {
        let mut done = task("done", Priority::Low, Some(-3));
        done.status = Status::Completed;
        let tasks = vec![
            task("late", Priority::Low, Some(-1)),
            done,
            task("undated", Priority::Low, None),
            task("today", Priority::Low, Some(0)),
            task("future", Priority::Low, Some(5)),
        ];
        let query = TaskQuery {
            filter: TaskFilter::Overdue,
            ..TaskQuery::default()
        };
        assert_eq!(
            ids(&project_tasks(&tasks, &query, now())),
            vec!["late", "today"]
        );
    }

    #[test]
    fn task_due_today_counts_as_overdue_during_the_day() {
        let tasks = vec![task("due-today", Priority::Medium, Some(0))];
        let query = TaskQuery {
            filter: TaskFilter::Overdue,
            ..TaskQuery::default()
        };
        assert_eq!(ids(&project_tasks(&tasks, &query, now())), vec!["due-today"]);
        assert_eq!(TaskStats::collect(&tasks, now()).overdue, 1);

        let midnight = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        assert!(project_tasks(&tasks, &query, midnight).is_empty());
    }

    #[test]
    fn completed_and_pending_partition_the_list() {
        let mut done = task("done", Priority::Low, None);
        done.status = Status::Completed;
        let tasks = vec![task("open", Priority::Low, None), done];

        let completed = TaskQuery {
            filter: TaskFilter::Completed,
            ..TaskQuery::default()
        };
        let pending = TaskQuery {
            filter: TaskFilter::Pending,
            ..TaskQuery::default()
        };
        assert_eq!(ids(&project_tasks(&tasks, &completed, now())), vec!["done"]);
        assert_eq!(ids(&project_tasks(&tasks, &pending, now())), vec!["open"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut tagged = task("tagged", Priority::Low, None);
        tagged.tags = vec!["work".into()];
        let mut categorized = task("categorized", Priority::Low, None);
        categorized.category = Some("Homework".into());
        let mut described = task("described", Priority::Low, None);
        described.description = "Remember the WORKshop".into();
        let other = task("other", Priority::Low, None);
        let tasks = vec![tagged, categorized, described, other];

        let query = TaskQuery {
            search: "WORK".into(),
            sort: TaskSort::Created,
            ..TaskQuery::default()
        };
        assert_eq!(
            ids(&project_tasks(&tasks, &query, now())),
            vec!["tagged", "categorized", "described"]
        );
    }

    #[test]
    fn due_date_sort_puts_undated_last_in_input_order() {
        let tasks = vec![
            task("none-1", Priority::Low, None),
            task("later", Priority::Low, Some(4)),
            task("none-2", Priority::Low, None),
            task("sooner", Priority::Low, Some(1)),
            task("past", Priority::Low, Some(-2)),
        ];
        let query = TaskQuery::default();
        assert_eq!(
            ids(&project_tasks(&tasks, &query, now())),
            vec!["past", "sooner", "later", "none-1", "none-2"]
        );
    }

    #[test]
    fn priority_sort_is_descending_and_stable() {
        let tasks = vec![
            task("m1", Priority::Medium, None),
            task("l", Priority::Low, None),
            task("h", Priority::High, None),
            task("m2", Priority::Medium, None),
        ];
        let query = TaskQuery {
            sort: TaskSort::Priority,
            ..TaskQuery::default()
        };
        assert_eq!(
            ids(&project_tasks(&tasks, &query, now())),
            vec!["h", "m1", "m2", "l"]
        );
    }

    #[test]
    fn created_sort_is_newest_first() {
        let mut old = task("old", Priority::Low, None);
        old.created_at = at(2);
        let mut new = task("new", Priority::Low, None);
        new.created_at = at(9);
        let tasks = vec![old, new];
        let query = TaskQuery {
            sort: TaskSort::Created,
            ..TaskQuery::default()
        };
        assert_eq!(ids(&project_tasks(&tasks, &query, now())), vec!["new", "old"]);
    }

    #[test]
    fn project_pipeline_filters_searches_and_sorts() {
        let mut mobile = project(2, "mobile app", ProjectStatus::Active, (25, 15));
        mobile.description = "Build iOS and Android".into();
        let projects = vec![
            project(1, "Website Redesign", ProjectStatus::Active, (12, 8)),
            mobile,
            project(3, "Marketing", ProjectStatus::Completed, (8, 8)),
            project(4, "Empty", ProjectStatus::OnHold, (0, 0)),
        ];

        let by_name = ProjectQuery::default();
        let names: Vec<_> = project_projects(&projects, &by_name)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(names, vec![4, 3, 2, 1]);

        let by_progress = ProjectQuery {
            sort: ProjectSort::Progress,
            ..ProjectQuery::default()
        };
        let order: Vec<_> = project_projects(&projects, &by_progress)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(order, vec![3, 1, 2, 4]);

        let active_android = ProjectQuery {
            filter: ProjectFilter::Active,
            search: "ANDROID".into(),
            ..ProjectQuery::default()
        };
        let hits: Vec<_> = project_projects(&projects, &active_android)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(hits, vec![2]);

        let on_hold = ProjectQuery {
            filter: ProjectFilter::OnHold,
            ..ProjectQuery::default()
        };
        assert_eq!(project_projects(&projects, &on_hold).len(), 1);
    }

    #[test]
    fn project_due_date_sort_puts_undated_last() {
        let mut a = project(1, "a", ProjectStatus::Active, (0, 0));
        a.due_date = NaiveDate::from_ymd_opt(2024, 3, 30);
        let b = project(2, "b", ProjectStatus::Active, (0, 0));
        let mut c = project(3, "c", ProjectStatus::Active, (0, 0));
        c.due_date = NaiveDate::from_ymd_opt(2024, 1, 31);
        let projects = vec![a, b, c];
        let query = ProjectQuery {
            sort: ProjectSort::DueDate,
            ..ProjectQuery::default()
        };
        let order: Vec<_> = project_projects(&projects, &query)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn stats_count_by_state() {
        let mut done = task("done", Priority::Low, Some(-5));
        done.status = Status::Completed;
        let tasks = vec![
            task("late", Priority::High, Some(-1)),
            task("soon", Priority::Low, Some(1)),
            done,
        ];
        assert_eq!(
            TaskStats::collect(&tasks, now()),
            TaskStats {
                total: 3,
                completed: 1,
                pending: 2,
                overdue: 1,
            }
        );

        let projects = vec![
            project(1, "a", ProjectStatus::Active, (0, 0)),
            project(2, "b", ProjectStatus::OnHold, (0, 0)),
            project(3, "c", ProjectStatus::Active, (0, 0)),
        ];
        assert_eq!(
            ProjectStats::collect(&projects),
            ProjectStats {
                total: 3,
                active: 2,
                completed: 0,
                on_hold: 1,
            }
        );
    }

    #[test]
    fn due_labels_and_urgency() {
        let t = today();
        assert_eq!(due_label(t, t), "Today");
        assert_eq!(due_label(t + Duration::days(1), t), "Tomorrow");
        assert_eq!(due_label(t - Duration::days(1), t), "Yesterday");
        assert_eq!(
            due_label(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(), t),
            "Mar 05, 2026"
        );

        assert_eq!(Urgency::of(t - Duration::days(3), t), Urgency::Overdue);
        assert_eq!(Urgency::of(t, t), Urgency::Today);
        assert_eq!(Urgency::of(t + Duration::days(1), t), Urgency::Tomorrow);
        assert_eq!(Urgency::of(t + Duration::days(9), t), Urgency::Later);
    }
}
