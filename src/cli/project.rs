use serde_json::json;

use crate::cli::commands::ProjectCommands;
use crate::db::{connection, project_repo};
use crate::error::SprintboardError;
use crate::output;

pub fn run(cmd: ProjectCommands, json_output: bool) -> i32 {
    let result = match cmd {
        ProjectCommands::Create {
            title,
            description,
            end_goal,
        } => run_create(&title, description.as_deref(), end_goal.as_deref(), json_output),
        ProjectCommands::List => run_list(json_output),
        ProjectCommands::Show { reference } => run_show(&reference, json_output),
        ProjectCommands::Delete { reference } => run_delete(&reference, json_output),
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

fn run_create(
    title: &str,
    description: Option<&str>,
    end_goal: Option<&str>,
    json_output: bool,
) -> Result<i32, SprintboardError> {
    if title.trim().is_empty() {
        return Err(SprintboardError::validation("Project title cannot be empty"));
    }
    let conn = connection::open_db()?;
    let id = ulid::Ulid::new().to_string();
    let project = project_repo::create_project(&conn, &id, title, description, end_goal)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "project": output::json::project_json(&project)
            })))
            .unwrap()
        );
    } else {
        println!("Created project: {} ({})", project.title, project.id);
    }
    Ok(0)
}

fn run_list(json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let projects = project_repo::list_projects(&conn)?;

    if json_output {
        let projects_json: Vec<_> = projects.iter().map(output::json::project_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "projects": projects_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_project_list(&projects);
    }
    Ok(0)
}

fn run_show(reference: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let project = project_repo::resolve_project(&conn, reference)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "project": output::json::project_json(&project)
            })))
            .unwrap()
        );
    } else {
        output::text::print_project(&project);
    }
    Ok(0)
}

fn run_delete(reference: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let project = project_repo::resolve_project(&conn, reference)?;
    project_repo::delete_project(&conn, &project.id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": project.id, "title": project.title }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted project: {} ({})", project.title, project.id);
    }
    Ok(0)
}
