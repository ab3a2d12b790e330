use crate::board::effects::EffectReport;
use crate::board::Board;
use crate::models::{BurndownPoint, Project, Sprint, Task};

fn short(id: &str) -> &str {
    &id[..std::cmp::min(8, id.len())]
}

pub fn print_project(p: &Project) {
    println!("Project: {} ({})", p.title, p.id);
    if let Some(ref desc) = p.description {
        println!("  Description: {desc}");
    }
    if let Some(ref goal) = p.end_goal {
        println!("  End goal: {goal}");
    }
    println!("  Created: {}", p.created_at);
}

pub fn print_project_list(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }
    for p in projects {
        println!("  {} ({})", p.title, short(&p.id));
    }
}

pub fn print_sprint(s: &Sprint) {
    println!("Sprint: {} ({})", s.title, s.id);
    if let Some(ref desc) = s.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", s.status.as_str());
    println!("  Dates: {} .. {}", s.start_date, s.end_date);
}

pub fn print_sprint_list(sprints: &[Sprint]) {
    if sprints.is_empty() {
        println!("No sprints found.");
        return;
    }
    for s in sprints {
        println!(
            "  {} ({}) [{}] {} .. {}",
            s.title,
            short(&s.id),
            s.status.as_str(),
            s.start_date,
            s.end_date
        );
    }
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", t.status.as_str());
    println!("  Sprint: {}", t.sprint_id);
    if let Some(ref assigned) = t.assigned_to {
        println!("  Assigned to: {assigned}");
    }
    if let Some(priority) = t.priority {
        println!("  Priority: {}", priority.as_str());
    }
    if let Some(points) = t.story_points {
        println!("  Story points: {points}");
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        let points = t
            .story_points
            .map(|p| format!(" {p}pt"))
            .unwrap_or_default();
        println!(
            "  [{}] {} ({}){}",
            t.status.as_str(),
            t.title,
            short(&t.id),
            points
        );
    }
}

pub fn print_board(board: &Board, tasks: &[Task]) {
    for col in board.ordered_columns() {
        println!("{} ({})", col.title, col.task_ids.len());
        for task_id in &col.task_ids {
            match tasks.iter().find(|t| &t.id == task_id) {
                Some(t) => println!("  {} ({})", t.title, short(&t.id)),
                None => println!("  ({})", short(task_id)),
            }
        }
    }
}

pub fn print_burndown(series: &[BurndownPoint]) {
    println!("{:<12} {:>6} {:>7}", "date", "ideal", "actual");
    for p in series {
        println!("{:<12} {:>6} {:>7}", p.date, p.ideal, p.actual);
    }
}

pub fn print_effects(report: &EffectReport) {
    if report.sprint_completed {
        println!("Sprint marked as completed!");
    }
    for notice in &report.notices {
        eprintln!("Warning: {notice}");
    }
}
