use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use taskflow::commands::project::ProjectEdits;
use taskflow::commands::task::TaskEdits;
use taskflow::form::{ProjectForm, TaskForm};
use taskflow::model::{Priority, ProjectStatus};
use taskflow::output::Format;
use taskflow::query::{ProjectFilter, ProjectSort, TaskFilter, TaskSort};

#[derive(Parser)]
#[command(
    name = "taskflow",
    version,
    about = "Track tasks and projects from the terminal"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Shorthand for --format json
    #[arg(long, global = true, hide = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a .taskflow/ directory here (or in $TASKFLOW_DIR)
    Init,
    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// Create a task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, short)]
        description: Option<String>,
        /// Task priority
        #[arg(long, value_enum, default_value = "medium")]
        priority: Priority,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Free-form category
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit task fields
    Edit {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long, short)]
        description: Option<String>,
        /// New priority
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// New category (empty string clears it)
        #[arg(long)]
        category: Option<String>,
        /// Replace tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Flip a task between todo and completed
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Rm {
        /// Task ID
        id: String,
    },
    /// Display a single task
    Show {
        /// Task ID
        id: String,
    },
    /// List, filter, search, and sort tasks
    List {
        /// Which tasks to show
        #[arg(long, value_enum, default_value = "all")]
        filter: TaskFilter,
        /// Case-insensitive text to look for in title, description, category, and tags
        #[arg(long, short)]
        search: Option<String>,
        /// Sort order (default from config)
        #[arg(long, value_enum)]
        sort: Option<TaskSort>,
    },
    /// Count tasks by state
    Stats,
}

#[derive(Subcommand)]
enum ProjectAction {
    /// Create a project
    Add {
        /// Project name
        name: String,
        /// Project description
        #[arg(long, short)]
        description: Option<String>,
        /// Project status
        #[arg(long, value_enum, default_value = "active")]
        status: ProjectStatus,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Display color (hex)
        #[arg(long)]
        color: Option<String>,
    },
    /// Edit project fields
    Edit {
        /// Project ID
        id: u64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long, short)]
        description: Option<String>,
        /// New status
        #[arg(long, value_enum)]
        status: Option<ProjectStatus>,
        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// New color (hex)
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a project
    Rm {
        /// Project ID
        id: u64,
    },
    /// Display a single project
    Show {
        /// Project ID
        id: u64,
    },
    /// List, filter, search, and sort projects
    List {
        /// Status to show
        #[arg(long, value_enum, default_value = "all")]
        status: ProjectFilter,
        /// Case-insensitive text to look for in name and description
        #[arg(long, short)]
        search: Option<String>,
        /// Sort order (default from config)
        #[arg(long, value_enum)]
        sort: Option<ProjectSort>,
    },
    /// Count projects by status
    Stats,
}

fn run_task(root: &std::path::Path, action: TaskAction, format: Format) -> taskflow::error::Result<()> {
    use taskflow::commands::task;

    match action {
        TaskAction::Add {
            title,
            description,
            priority,
            due,
            category,
            tags,
        } => {
            let form = TaskForm {
                title,
                description: description.unwrap_or_default(),
                priority,
                due_date: due,
                category: category.unwrap_or_default(),
                tags: tags.unwrap_or_default(),
            };
            task::add(root, form, format)
        }
        TaskAction::Edit {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
            category,
            tags,
        } => task::edit(
            root,
            &id,
            TaskEdits {
                title,
                description,
                priority,
                due,
                clear_due,
                category,
                tags,
            },
            format,
        ),
        TaskAction::Toggle { id } => task::toggle(root, &id, format),
        TaskAction::Rm { id } => task::remove(root, &id, format),
        TaskAction::Show { id } => task::show(root, &id, format),
        TaskAction::List {
            filter,
            search,
            sort,
        } => task::list(root, filter, search, sort, format),
        TaskAction::Stats => task::stats(root, format),
    }
}

fn run_project(
    root: &std::path::Path,
    action: ProjectAction,
    format: Format,
) -> taskflow::error::Result<()> {
    use taskflow::commands::project;

    match action {
        ProjectAction::Add {
            name,
            description,
            status,
            due,
            color,
        } => {
            let mut form = ProjectForm::new(name);
            form.description = description.unwrap_or_default();
            form.status = status;
            form.due_date = due;
            if let Some(color) = color {
                form.color = color;
            }
            project::add(root, form, format)
        }
        ProjectAction::Edit {
            id,
            name,
            description,
            status,
            due,
            clear_due,
            color,
        } => project::edit(
            root,
            id,
            ProjectEdits {
                name,
                description,
                status,
                due,
                clear_due,
                color,
            },
            format,
        ),
        ProjectAction::Rm { id } => project::remove(root, id, format),
        ProjectAction::Show { id } => project::show(root, id, format),
        ProjectAction::List {
            status,
            search,
            sort,
        } => project::list(root, status, search, sort, format),
        ProjectAction::Stats => project::stats(root, format),
    }
}

fn run(cli: Cli, format: Format) -> taskflow::error::Result<()> {
    // `init` runs before data directory discovery
    if let Commands::Init = cli.command {
        let base = match taskflow::config::dir_override() {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        return taskflow::commands::init::run(&base);
    }

    let root = taskflow::store::repo::find_repo_root()?;

    match cli.command {
        Commands::Init => unreachable!(),
        Commands::Task { action } => run_task(&root, action, format),
        Commands::Project { action } => run_project(&root, action, format),
    }
}

fn main() {
    taskflow::logging::init();
    let cli = Cli::parse();
    let format = if cli.json { Format::Json } else { cli.format };
    if let Err(e) = run(cli, format) {
        taskflow::commands::report_error(&e, format);
        std::process::exit(1);
    }
}
