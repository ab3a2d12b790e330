use chrono::Local;
use serde_json::json;

use crate::board::effects;
use crate::board::{apply_drag, derive_board, Board, DragOp, DragTarget};
use crate::cli::commands::{BoardCommands, ColumnCommands};
use crate::cli::confirm::CliConfirm;
use crate::db::{connection, sprint_repo, task_repo};
use crate::error::SprintboardError;
use crate::models::{Task, BACKLOG_SPRINT};
use crate::output;

pub fn run(cmd: BoardCommands, json_output: bool, assume_yes: bool) -> i32 {
    let result = match cmd {
        BoardCommands::Show { sprint } => run_show(&sprint, json_output),
        BoardCommands::Move {
            task,
            column,
            index,
        } => run_move(&task, &column, index, json_output, assume_yes),
        BoardCommands::Column(col_cmd) => match col_cmd {
            ColumnCommands::Add { sprint, name } => run_column_add(&sprint, &name, json_output),
            ColumnCommands::Remove { sprint, id } => {
                run_column_remove(&sprint, &id, json_output)
            }
        },
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

fn sprint_board(
    conn: &rusqlite::Connection,
    sprint_ref: &str,
) -> Result<(String, Vec<Task>, Board), SprintboardError> {
    let sprint = sprint_repo::resolve_sprint(conn, sprint_ref)?;
    let tasks = task_repo::list_tasks_by_sprint(conn, &sprint.id)?;
    let board = derive_board(&tasks);
    Ok((sprint.id, tasks, board))
}

fn print_board(board: &Board, tasks: &[Task], json_output: bool) {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "board": output::json::board_json(board)
            })))
            .unwrap()
        );
    } else {
        output::text::print_board(board, tasks);
    }
}

fn run_show(sprint_ref: &str, json_output: bool) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let (_, tasks, board) = sprint_board(&conn, sprint_ref)?;
    print_board(&board, &tasks, json_output);
    Ok(0)
}

fn run_move(
    task_ref: &str,
    column: &str,
    index: Option<usize>,
    json_output: bool,
    assume_yes: bool,
) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, task_ref)?;
    if task.sprint_id == BACKLOG_SPRINT {
        return Err(SprintboardError::validation(
            "Backlog tasks are not on a board; use `backlog move` to schedule them",
        ));
    }

    let tasks = task_repo::list_tasks_by_sprint(&conn, &task.sprint_id)?;
    let board = derive_board(&tasks);
    if !board.columns.contains_key(column) {
        return Err(SprintboardError::validation(format!(
            "No column '{column}' on this board"
        )));
    }

    let (source_column, source_index) = board
        .locate_task(&task.id)
        .map(|(c, i)| (c.to_string(), i))
        .ok_or_else(|| SprintboardError::task_not_found(&task.id))?;
    let dest_index = index.unwrap_or_else(|| board.columns[column].task_ids.len());

    let drag = DragOp {
        task_id: task.id.clone(),
        source_column,
        source_index,
        dest: Some(DragTarget {
            column: column.to_string(),
            index: dest_index,
        }),
    };
    let outcome = apply_drag(&board, &drag);

    // The optimistic board is rendered only after persistence succeeds; a
    // failed update propagates as an error and the derived state is dropped.
    let mut report = effects::EffectReport::default();
    if let Some(change) = &outcome.status_change {
        let old_status = task.status.clone();
        let updated = task_repo::update_task_status(&conn, &change.task_id, &change.new_status)?;
        let mut confirm = CliConfirm::new(json_output, assume_yes);
        let today = Local::now().date_naive();
        report = effects::on_status_change(&conn, &updated, &old_status, today, &mut confirm);
    }

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "board": output::json::board_json(&outcome.board),
                "moved": {
                    "task_id": task.id,
                    "column": column,
                    "status_changed": outcome.status_change.is_some()
                },
                "effects": output::json::effects_json(&report)
            })))
            .unwrap()
        );
    } else {
        println!("Moved {} to {}", task.title, column);
        output::text::print_board(&outcome.board, &tasks);
        output::text::print_effects(&report);
    }
    Ok(0)
}

fn run_column_add(
    sprint_ref: &str,
    name: &str,
    json_output: bool,
) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let (_, tasks, mut board) = sprint_board(&conn, sprint_ref)?;
    let id = board.add_column(name)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "added": { "id": id },
                "board": output::json::board_json(&board)
            })))
            .unwrap()
        );
    } else {
        println!("Column \"{name}\" added");
        output::text::print_board(&board, &tasks);
    }
    Ok(0)
}

fn run_column_remove(
    sprint_ref: &str,
    id: &str,
    json_output: bool,
) -> Result<i32, SprintboardError> {
    let conn = connection::open_db()?;
    let (_, tasks, mut board) = sprint_board(&conn, sprint_ref)?;
    board.remove_column(id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "removed": { "id": id },
                "board": output::json::board_json(&board)
            })))
            .unwrap()
        );
    } else {
        println!("Column removed");
        output::text::print_board(&board, &tasks);
    }
    Ok(0)
}
