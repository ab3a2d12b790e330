use chrono::Local;
use serde_json::json;

use crate::board::burndown::BurndownAction;
use crate::board::columns::slugify;
use crate::board::effects::{self, Confirm};
use crate::cli::commands::TaskCommands;
use crate::cli::confirm::CliConfirm;
use crate::db::task_repo::TaskPatch;
use crate::db::{burndown_repo, connection, sprint_repo, task_repo};
use crate::error::SprintboardError;
use crate::models::{Priority, TaskStatus};
use crate::output;

pub fn run(cmd: TaskCommands, json_output: bool, assume_yes: bool) -> i32 {
    let result = match cmd {
        TaskCommands::Add {
            sprint,
            title,
            description,
            status,
            assignee,
            priority,
            points,
        } => run_add(
            &sprint,
            &title,
            description.as_deref(),
            status.as_deref(),
            assignee.as_deref(),
            priority.as_deref(),
            points,
            json_output,
        ),
        TaskCommands::List { sprint } => run_list(&sprint, json_output),
        TaskCommands::Show { id } => run_show(&id, json_output),
        TaskCommands::Edit {
            id,
            title,
            description,
            status,
            assignee,
            priority,
            points,
        } => run_edit(
            &id,
            title,
            description,
            status.as_deref(),
            assignee,
            priority.as_deref(),
            points,
            json_output,
            assume_yes,
        ),
        TaskCommands::Delete { id } => run_delete(&id, json_output, assume_yes),
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

fn parse_priority(s: &str) -> Result<Priority, SprintboardError> {
    Priority::from_str(s)
        .ok_or_else(|| SprintboardError::validation(format!("Invalid priority: {s}")))
}

/// Statuses are column ids, so they must already be slugs.
fn parse_status(s: &str) -> Result<TaskStatus, SprintboardError> {
    if s.is_empty() || slugify(s) != s {
        return Err(SprintboardError::validation(format!(
            "Invalid status token: '{s}' (expected a lowercase slug like 'code-review')"
        )));
    }
    Ok(TaskStatus::parse(s))
}

#[allow(clippy::too_many_arguments)]
fn run_add(
    sprint_ref: &str,
    title: &str,
    description: Option<&str>,
    status: Option<&str>,
    assignee: Option<&str>,
    priority: Option<&str>,
    points: Option<i64>,
    json_output: bool,
) -> Result<i32, SprintboardError> {
    if title.trim().is_empty() {
        return Err(SprintboardError::validation("Task title cannot be empty"));
    }
    let status = match status {
        Some(s) => parse_status(s)?,
        None => TaskStatus::Todo,
    };
    let priority = priority.map(parse_priority).transpose()?;
    if points.is_some_and(|p| p < 0) {
        return Err(SprintboardError::validation("Story points cannot be negative"));
    }

    let conn = connection::open_db()?;
    let sprint = sprint_repo::resolve_sprint(&conn, sprint_ref)?;
    let id = ulid::Ulid::new().to_string();
    let task = task_repo::create_task(
        &conn,
        &id,
        &sprint.id,
        Some(&sprint.project_id),
        title,
        description,
        &status,
        assignee,
        priority,
        points,
    )?;

    // A newly committed task raises the remaining-work target.
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
        println!("Added task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_list(sprint_ref: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let sprint = sprint_repo::resolve_sprint(&conn, sprint_ref)?;
    let tasks = task_repo::list_tasks_by_sprint(&conn, &sprint.id)?;

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

fn run_show(id: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_detail(&task)
            })))
            .unwrap()
        );
    } else {
        output::text::print_task(&task);
    }
    Ok(0)
}

#[allow(clippy::too_many_arguments)]
fn run_edit(
    id: &str,
    title: Option<String>,
    description: Option<String>,
    status: Option<&str>,
    assignee: Option<String>,
    priority: Option<&str>,
    points: Option<i64>,
    json_output: bool,
    assume_yes: bool,
) -> Result<i32, SprintboardError> {
    let status = status.map(parse_status).transpose()?;
    let priority = priority.map(parse_priority).transpose()?;
    if points.is_some_and(|p| p < 0) {
        return Err(SprintboardError::validation("Story points cannot be negative"));
    }

    let conn = connection::open_db()?;
    let existing = task_repo::resolve_task(&conn, id)?;
    let old_status = existing.status.clone();

    let patch = TaskPatch {
        title,
        description,
        status,
        assigned_to: assignee,
        priority,
        story_points: points,
    };
    let task = task_repo::update_task(&conn, &existing.id, &patch)?;

    // Side effects fire once per persisted update whose status changed.
    let mut report = effects::EffectReport::default();
    if task.status != old_status {
        let mut confirm = CliConfirm::new(json_output, assume_yes);
        let today = Local::now().date_naive();
        report = effects::on_status_change(&conn, &task, &old_status, today, &mut confirm);
    }

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_detail(&task),
                "effects": output::json::effects_json(&report)
            })))
            .unwrap()
        );
    } else {
        println!("Task {} → {}", task.id, task.status.as_str());
        output::text::print_effects(&report);
    }
    Ok(0)
}

fn run_delete(id: &str, json_output: bool, assume_yes: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, id)?;

    let mut confirm = CliConfirm::new(json_output, assume_yes);
    if !confirm.confirm("Are you sure you want to delete this task?") {
        if json_output {
            println!(
                "{}",
                serde_json::to_string_pretty(&output::json::success(json!({
                    "deleted": false
                })))
                .unwrap()
            );
        } else {
            println!("Task left unchanged.");
        }
        return Ok(0);
    }

    task_repo::delete_task(&conn, &task.id)?;

    // Removing a committed task lowers the remaining-work target, and undoes
    // today's completion credit if it had already been counted.
    if let Some(points) = task.story_points.filter(|p| *p > 0) {
        if let Some(project_id) = effects::owning_project(&conn, &task).unwrap_or(None) {
            let today = Local::now().date_naive();
            burndown_repo::apply(&conn, &project_id, points, BurndownAction::Remove, today)?;
        }
    }

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": task.id, "title": task.title }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted task: {} ({})", task.title, task.id);
    }
    Ok(0)
}
