use chrono::Local;
use serde_json::json;

use crate::db::{burndown_repo, connection, project_repo};
use crate::error::SprintboardError;
use crate::output;

pub fn run(project_ref: &str, json_output: bool) -> i32 {
    match run_inner(project_ref, json_output) {
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

fn run_inner(project_ref: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let project = project_repo::resolve_project(&conn, project_ref)?;
    let today = Local::now().date_naive();
    let series = burndown_repo::series_or_default(&conn, &project.id, today)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "project_id": project.id,
                "burndown": output::json::burndown_json(&series)
            })))
            .unwrap()
        );
    } else {
        println!("Burndown for {}:", project.title);
        output::text::print_burndown(&series);
    }
    Ok(0)
}
