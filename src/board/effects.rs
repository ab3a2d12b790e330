use chrono::NaiveDate;
use rusqlite::Connection;

use crate::board::burndown::BurndownAction;
use crate::db::{burndown_repo, sprint_repo, task_repo};
use crate::models::{SprintStatus, Task, TaskStatus, BACKLOG_SPRINT};

/// Yes/no user decision primitive. The board core only ever asks; how the
/// answer is obtained (stdin, --yes, test stub) is up to the caller.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

pub const COMPLETE_SPRINT_PROMPT: &str =
    "All tasks are completed! Mark this sprint as completed?";

#[derive(Debug, Default, Clone)]
pub struct EffectReport {
    /// The owning sprint was transitioned to completed.
    pub sprint_completed: bool,
    /// The project burndown series was updated.
    pub burndown_updated: bool,
    /// Non-fatal effect failures, surfaced to the user.
    pub notices: Vec<String>,
}

/// Run the side effects of a persisted status change: the sprint
/// auto-completion check and the burndown update. Both run independently;
/// a failure in one is recorded as a notice and never rolls back the task
/// update that already happened.
pub fn on_status_change(
    conn: &Connection,
    task: &Task,
    old_status: &TaskStatus,
    today: NaiveDate,
    confirm: &mut dyn Confirm,
) -> EffectReport {
    let mut report = EffectReport::default();
    if &task.status == old_status {
        return report;
    }

    if task.status.is_done() && task.sprint_id != BACKLOG_SPRINT {
        match check_sprint_completion(conn, task, confirm) {
            Ok(completed) => report.sprint_completed = completed,
            Err(e) => report.notices.push(format!("Failed to complete sprint: {e}")),
        }
    }

    if !old_status.is_done() && task.status.is_done() {
        if let Some(points) = task.story_points.filter(|p| *p > 0) {
            match update_burndown(conn, task, points, today) {
                Ok(updated) => report.burndown_updated = updated,
                Err(e) => report.notices.push(format!("Failed to update burndown: {e}")),
            }
        }
    }

    report
}

fn check_sprint_completion(
    conn: &Connection,
    task: &Task,
    confirm: &mut dyn Confirm,
) -> Result<bool, crate::error::SprintboardError> {
    let sprint = sprint_repo::get_sprint_by_id(conn, &task.sprint_id)?;
    if sprint.status != SprintStatus::InProgress {
        return Ok(false);
    }
    if task_repo::remaining_open_count(conn, &sprint.id, &task.id)? > 0 {
        return Ok(false);
    }
    // Advisory: declining leaves the sprint in progress.
    if !confirm.confirm(COMPLETE_SPRINT_PROMPT) {
        return Ok(false);
    }
    sprint_repo::update_sprint_status(conn, &sprint.id, SprintStatus::Completed)?;
    Ok(true)
}

fn update_burndown(
    conn: &Connection,
    task: &Task,
    points: i64,
    today: NaiveDate,
) -> Result<bool, crate::error::SprintboardError> {
    let project_id = match owning_project(conn, task)? {
        Some(id) => id,
        None => return Ok(false),
    };
    burndown_repo::apply(conn, &project_id, points, BurndownAction::Complete, today)?;
    Ok(true)
}

/// The project a task's points count against: its direct link, or its
/// sprint's project.
pub fn owning_project(
    conn: &Connection,
    task: &Task,
) -> Result<Option<String>, crate::error::SprintboardError> {
    if let Some(ref id) = task.project_id {
        return Ok(Some(id.clone()));
    }
    if task.sprint_id == BACKLOG_SPRINT {
        return Ok(None);
    }
    let sprint = sprint_repo::get_sprint_by_id(conn, &task.sprint_id)?;
    Ok(Some(sprint.project_id))
}
