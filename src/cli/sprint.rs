use chrono::NaiveDate;
use serde_json::json;

use crate::board::effects::Confirm;
use crate::cli::commands::SprintCommands;
use crate::cli::confirm::CliConfirm;
use crate::db::{connection, project_repo, sprint_repo, task_repo};
use crate::error::SprintboardError;
use crate::models::SprintStatus;
use crate::output;

pub fn run(cmd: SprintCommands, json_output: bool, assume_yes: bool) -> i32 {
    let result = match cmd {
        SprintCommands::Create {
            project,
            title,
            description,
            start,
            end,
        } => run_create(&project, &title, description.as_deref(), &start, &end, json_output),
        SprintCommands::List { project } => run_list(&project, json_output),
        SprintCommands::Show { reference } => run_show(&reference, json_output),
        SprintCommands::Start { reference } => run_start(&reference, json_output),
        SprintCommands::Complete { reference } => {
            run_complete(&reference, json_output, assume_yes)
        }
        SprintCommands::Delete { reference } => run_delete(&reference, json_output),
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

fn parse_date(label: &str, value: &str) -> Result<NaiveDate, SprintboardError> {
    value
        .parse::<NaiveDate>()
        .map_err(|_| SprintboardError::validation(format!("Invalid {label} date: {value}")))
}

fn run_create(
    project_ref: &str,
    title: &str,
    description: Option<&str>,
    start: &str,
    end: &str,
    json_output: bool,
) -> Result<i32, SprintboardError> {
    if title.trim().is_empty() {
        return Err(SprintboardError::validation("Sprint title cannot be empty"));
    }
    let start_date = parse_date("start", start)?;
    let end_date = parse_date("end", end)?;
    if end_date < start_date {
        return Err(SprintboardError::validation(
            "Sprint end date is before its start date",
        ));
    }

    let conn = connection::open_db()?;
    let project = project_repo::resolve_project(&conn, project_ref)?;
    let id = ulid::Ulid::new().to_string();
    let sprint = sprint_repo::create_sprint(
        &conn,
        &id,
        &project.id,
        title,
        description,
        &start_date.to_string(),
        &end_date.to_string(),
    )?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "sprint": output::json::sprint_json(&sprint)
            })))
            .unwrap()
        );
    } else {
        println!("Created sprint: {} ({})", sprint.title, sprint.id);
    }
    Ok(0)
}

fn run_list(project_ref: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let project = project_repo::resolve_project(&conn, project_ref)?;
    let sprints = sprint_repo::list_sprints_by_project(&conn, &project.id)?;

    if json_output {
        let sprints_json: Vec<_> = sprints.iter().map(output::json::sprint_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "sprints": sprints_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_sprint_list(&sprints);
    }
    Ok(0)
}

fn run_show(reference: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let sprint = sprint_repo::resolve_sprint(&conn, reference)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "sprint": output::json::sprint_json(&sprint)
            })))
            .unwrap()
        );
    } else {
        output::text::print_sprint(&sprint);
    }
    Ok(0)
}

fn run_start(reference: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let sprint = sprint_repo::resolve_sprint(&conn, reference)?;
    let sprint = sprint_repo::update_sprint_status(&conn, &sprint.id, SprintStatus::InProgress)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "sprint": output::json::sprint_json(&sprint)
            })))
            .unwrap()
        );
    } else {
        println!("Sprint {} → in-progress", sprint.id);
    }
    Ok(0)
}

fn run_complete(
    reference: &str,
    json_output: bool,
    assume_yes: bool,
) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let sprint = sprint_repo::resolve_sprint(&conn, reference)?;

    if !task_repo::all_tasks_done(&conn, &sprint.id)? {
        let mut confirm = CliConfirm::new(json_output, assume_yes);
        if !confirm.confirm("Not all tasks are completed. Complete this sprint anyway?") {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::success(json!({
                        "sprint": output::json::sprint_json(&sprint),
                        "completed": false
                    })))
                    .unwrap()
                );
            } else {
                println!("Sprint left unchanged.");
            }
            return Ok(0);
        }
    }

    let sprint = sprint_repo::update_sprint_status(&conn, &sprint.id, SprintStatus::Completed)?;
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "sprint": output::json::sprint_json(&sprint),
                "completed": true
            })))
            .unwrap()
        );
    } else {
        println!("Sprint marked as completed!");
    }
    Ok(0)
}

fn run_delete(reference: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let sprint = sprint_repo::resolve_sprint(&conn, reference)?;
    sprint_repo::delete_sprint(&conn, &sprint.id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": sprint.id, "title": sprint.title }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted sprint: {} ({})", sprint.title, sprint.id);
    }
    Ok(0)
}
