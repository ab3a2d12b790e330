use chrono::Local;
use serde_json::json;

use crate::board::burndown::BurndownAction;
use crate::cli::commands::BacklogCommands;
use crate::db::{burndown_repo, connection, project_repo, sprint_repo, task_repo};
use crate::error::SprintboardError;
use crate::models::{Priority, SprintStatus, TaskStatus, BACKLOG_SPRINT};
use crate::output;

pub fn run(cmd: BacklogCommands, json_output: bool) -> i32 {
    let result = match cmd {
        BacklogCommands::Add {
            project,
            title,
            description,
            priority,
            points,
        } => run_add(
            &project,
            &title,
            description.as_deref(),
            priority.as_deref(),
            points,
            json_output,
        ),
        BacklogCommands::List { project } => run_list(&project, json_output),
        BacklogCommands::Move { task, sprint } => run_move(&task, &sprint, json_output),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

fn run_add(
    project_ref: &str,
    title: &str,
    description: Option<&str>,
    priority: Option<&str>,
    points: Option<i64>,
    json_output: bool,
) -> Result<i32, SprintboardError> {
    if title.trim().is_empty() {
        return Err(SprintboardError::validation("Task title cannot be empty"));
    }
    let priority = priority
        .map(|s| {
            Priority::from_str(s)
                .ok_or_else(|| SprintboardError::validation(format!("Invalid priority: {s}")))
        })
        .transpose()?;
    if points.is_some_and(|p| p < 0) {
        return Err(SprintboardError::validation("Story points cannot be negative"));
    }

    let conn = connection::open_db()?;
    let project = project_repo::resolve_project(&conn, project_ref)?;
    let id = ulid::Ulid::new().to_string();
    let task = task_repo::create_task(
        &conn,
        &id,
        BACKLOG_SPRINT,
        Some(&project.id),
        title,
        description,
        &TaskStatus::Backlog,
        None,
        priority,
        points,
    )?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_detail(&task)
            })))
            .unwrap()
        );
    } else {
        println!("Added backlog task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_list(project_ref: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let project = project_repo::resolve_project(&conn, project_ref)?;
    let tasks = task_repo::list_backlog_tasks(&conn, &project.id)?;

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(output::json::task_summary).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "tasks": tasks_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

fn run_move(task_ref: &str, sprint_ref: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, task_ref)?;
    let sprint = sprint_repo::resolve_sprint(&conn, sprint_ref)?;
    if sprint.status == SprintStatus::Completed {
        return Err(SprintboardError::sprint_completed(&sprint.id));
    }

    // Scheduling into a sprint turns the task into a todo item.
    let task = task_repo::move_task_to_sprint(&conn, &task.id, &sprint.id, &TaskStatus::Todo)?;

    // Points now count against the sprint's project.
    if let Some(points) = task.story_points.filter(|p| *p > 0) {
        let today = Local::now().date_naive();
        burndown_repo::apply(&conn, &sprint.project_id, points, BurndownAction::Add, today)?;
    }

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_detail(&task)
            })))
            .unwrap()
        );
    } else {
        println!("Task moved to sprint {}", sprint.title);
    }
    Ok(0)
}
