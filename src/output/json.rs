use serde_json::{json, Value};

use crate::board::effects::EffectReport;
use crate::board::Board;
use crate::error::SprintboardError;
use crate::models::{BurndownPoint, Project, Sprint, Task};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &SprintboardError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn project_json(p: &Project) -> Value {
    json!({
        "id": p.id,
        "title": p.title,
        "description": p.description,
        "end_goal": p.end_goal,
        "created_at": p.created_at,
        "updated_at": p.updated_at
    })
}

pub fn sprint_json(s: &Sprint) -> Value {
    json!({
        "id": s.id,
        "project_id": s.project_id,
        "title": s.title,
        "description": s.description,
        "start_date": s.start_date,
        "end_date": s.end_date,
        "status": s.status.as_str()
    })
}

pub fn task_summary(t: &Task) -> Value {
    let mut v = json!({
        "id": t.id,
        "title": t.title,
        "status": t.status.as_str(),
        "sprint_id": t.sprint_id
    });
    if let Some(points) = t.story_points {
        v["story_points"] = json!(points);
    }
    if let Some(ref assigned) = t.assigned_to {
        v["assigned_to"] = json!(assigned);
    }
    v
}

pub fn task_detail(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "status": t.status.as_str(),
        "sprint_id": t.sprint_id,
        "project_id": t.project_id,
        "assigned_to": t.assigned_to,
        "priority": t.priority.map(|p| p.as_str()),
        "story_points": t.story_points,
        "created_at": t.created_at,
        "updated_at": t.updated_at
    })
}

pub fn board_json(board: &Board) -> Value {
    let columns: Vec<Value> = board
        .ordered_columns()
        .map(|c| {
            json!({
                "id": c.id,
                "title": c.title,
                "task_ids": c.task_ids
            })
        })
        .collect();
    json!({
        "order": board.order,
        "columns": columns
    })
}

pub fn burndown_json(series: &[BurndownPoint]) -> Value {
    let points: Vec<Value> = series
        .iter()
        .map(|p| {
            json!({
                "date": p.date.to_string(),
                "ideal": p.ideal,
                "actual": p.actual
            })
        })
        .collect();
    json!(points)
}

pub fn effects_json(report: &EffectReport) -> Value {
    json!({
        "sprint_completed": report.sprint_completed,
        "burndown_updated": report.burndown_updated,
        "notices": report.notices
    })
}
