use chrono::NaiveDate;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::error::Result;
use crate::model::{Priority, Project, ProjectStatus, Task};
use crate::query::{ProjectStats, TaskStats, Urgency, due_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn priority_badge(priority: Priority) -> ColoredString {
    let label = priority.to_string();
    match priority {
        Priority::High => label.red().bold(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.green(),
    }
}

fn due_badge(due: NaiveDate, today: NaiveDate) -> ColoredString {
    let label = due_label(due, today);
    match Urgency::of(due, today) {
        Urgency::Overdue => label.red(),
        Urgency::Today => label.bright_red(),
        Urgency::Tomorrow => label.yellow(),
        Urgency::Later => label.green(),
    }
}

fn status_badge(status: ProjectStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        ProjectStatus::Active => label.blue(),
        ProjectStatus::Completed => label.green(),
        ProjectStatus::OnHold => label.yellow(),
    }
}

/// Ten-cell bar, e.g. `[######----] 60%`. Values over 100 fill the bar.
pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) / 10) as usize;
    format!("[{}{}] {}%", "#".repeat(filled), "-".repeat(10 - filled), percent)
}

pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() > max_len {
        let truncated: String = title.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        title.to_string()
    }
}

fn minimal_task_row(task: &Task) -> String {
    let due = task
        .due_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "{:12} {:20} {:6} {:9} {}",
        truncate_title(&task.id, 12),
        truncate_title(&task.title, 20),
        task.priority,
        task.status,
        due
    )
}

fn minimal_project_row(project: &Project) -> String {
    format!(
        "{:>4} {:24} {:9} {:>4}%",
        project.id,
        truncate_title(&project.name, 24),
        project.status,
        project.progress()
    )
}

pub fn print_task(task: &Task, today: NaiveDate, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(task)?,
        Format::Pretty => {
            let check = if task.is_completed() { "[x]" } else { "[ ]" };
            let title = if task.is_completed() {
                task.title.dimmed().strikethrough()
            } else {
                task.title.bold()
            };
            println!("{} {} ({})", check, title, task.id.dimmed());
            if !task.description.is_empty() {
                println!("  {}", task.description);
            }
            let mut meta = format!("  priority: {}", priority_badge(task.priority));
            if let Some(due) = task.due_date {
                meta.push_str(&format!(" | due: {}", due_badge(due, today)));
            }
            if let Some(ref category) = task.category {
                meta.push_str(&format!(" | category: {}", category));
            }
            println!("{meta}");
            if !task.tags.is_empty() {
                let tags: Vec<String> = task.tags.iter().map(|t| format!("#{t}")).collect();
                println!("  {}", tags.join(" ").cyan());
            }
            println!("  created {}", task.created_at.format("%b %d"));
        }
        Format::Minimal => println!("{}", minimal_task_row(task)),
    }
    Ok(())
}

pub fn print_tasks(tasks: &[&Task], today: NaiveDate, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(tasks)?,
        Format::Pretty => {
            if tasks.is_empty() {
                println!("No tasks found");
            }
            for task in tasks {
                print_task(task, today, Format::Pretty)?;
                println!();
            }
        }
        Format::Minimal => {
            println!(
                "{:12} {:20} {:6} {:9} DUE",
                "ID", "TITLE", "PRIO", "STATUS"
            );
            println!("{}", "-".repeat(60));
            for task in tasks {
                println!("{}", minimal_task_row(task));
            }
        }
    }
    Ok(())
}

pub fn print_project(project: &Project, today: NaiveDate, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(project)?,
        Format::Pretty => {
            println!(
                "[{}] {} ({})",
                project.id,
                project.name.bold(),
                status_badge(project.status)
            );
            if !project.description.is_empty() {
                println!("  {}", project.description);
            }
            println!(
                "  progress: {} ({}/{} tasks)",
                progress_bar(project.progress()),
                project.completed_tasks,
                project.task_count
            );
            let mut meta = format!("  color: {}", project.color);
            if let Some(due) = project.due_date {
                meta.push_str(&format!(" | due: {}", due_badge(due, today)));
            }
            println!("{meta}");
        }
        Format::Minimal => println!("{}", minimal_project_row(project)),
    }
    Ok(())
}

pub fn print_projects(projects: &[&Project], today: NaiveDate, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(projects)?,
        Format::Pretty => {
            if projects.is_empty() {
                println!("No projects found");
            }
            for project in projects {
                print_project(project, today, Format::Pretty)?;
                println!();
            }
        }
        Format::Minimal => {
            println!("{:>4} {:24} {:9} {:>5}", "ID", "NAME", "STATUS", "DONE");
            println!("{}", "-".repeat(46));
            for project in projects {
                println!("{}", minimal_project_row(project));
            }
        }
    }
    Ok(())
}

/// Output for a delete: the removed record, or `null` when nothing matched.
pub fn print_removed<T: Serialize>(removed: Option<&T>, what: &str, format: Format) -> Result<()> {
    match (removed, format) {
        (_, Format::Json) => print_json(&removed)?,
        (Some(_), _) => println!("Deleted {what}"),
        (None, _) => println!("No {what} matched; nothing deleted"),
    }
    Ok(())
}

pub fn print_task_stats(stats: &TaskStats, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(stats)?,
        Format::Pretty | Format::Minimal => {
            println!("total:     {}", stats.total);
            println!("completed: {}", stats.completed.to_string().green());
            println!("pending:   {}", stats.pending.to_string().yellow());
            println!("overdue:   {}", stats.overdue.to_string().red());
        }
    }
    Ok(())
}

pub fn print_project_stats(stats: &ProjectStats, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(stats)?,
        Format::Pretty | Format::Minimal => {
            println!("total:     {}", stats.total);
            println!("active:    {}", stats.active.to_string().blue());
            println!("completed: {}", stats.completed.to_string().green());
            println!("on-hold:   {}", stats.on_hold.to_string().yellow());
        }
    }
    Ok(())
}
