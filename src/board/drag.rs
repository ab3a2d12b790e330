use crate::board::columns::Board;
use crate::models::TaskStatus;

/// A drag gesture: where the task came from and where it was dropped.
/// `dest` is `None` when the drop landed outside any column.
#[derive(Debug, Clone)]
pub struct DragOp {
    pub task_id: String,
    pub source_column: String,
    pub source_index: usize,
    pub dest: Option<DragTarget>,
}

#[derive(Debug, Clone)]
pub struct DragTarget {
    pub column: String,
    pub index: usize,
}

/// A status update the caller must persist exactly once. Emitted only for
/// cross-column moves; a task's status is defined to equal the id of the
/// column it resides in.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub task_id: String,
    pub new_status: TaskStatus,
}

#[derive(Debug, Clone)]
pub struct DragOutcome {
    pub board: Board,
    pub status_change: Option<StatusChange>,
}

/// Apply a drag to the board, synchronously and without side effects.
///
/// The returned board is the optimistic state; persistence of the reported
/// status change is the caller's responsibility and is not rolled back here
/// if it later fails.
pub fn apply_drag(board: &Board, drag: &DragOp) -> DragOutcome {
    let unchanged = || DragOutcome {
        board: board.clone(),
        status_change: None,
    };

    let dest = match &drag.dest {
        Some(dest) => dest,
        None => return unchanged(),
    };

    if dest.column == drag.source_column && dest.index == drag.source_index {
        return unchanged();
    }

    if !board.columns.contains_key(&drag.source_column)
        || !board.columns.contains_key(&dest.column)
    {
        return unchanged();
    }

    let mut next = board.clone();

    if drag.source_column == dest.column {
        let col = next.columns.get_mut(&drag.source_column).unwrap();
        if drag.source_index >= col.task_ids.len() {
            return unchanged();
        }
        col.task_ids.remove(drag.source_index);
        let at = dest.index.min(col.task_ids.len());
        col.task_ids.insert(at, drag.task_id.clone());
        return DragOutcome {
            board: next,
            status_change: None,
        };
    }

    {
        let source = next.columns.get_mut(&drag.source_column).unwrap();
        if drag.source_index >= source.task_ids.len() {
            return unchanged();
        }
        source.task_ids.remove(drag.source_index);
    }
    {
        let target = next.columns.get_mut(&dest.column).unwrap();
        let at = dest.index.min(target.task_ids.len());
        target.task_ids.insert(at, drag.task_id.clone());
    }

    DragOutcome {
        board: next,
        status_change: Some(StatusChange {
            task_id: drag.task_id.clone(),
            new_status: TaskStatus::parse(&dest.column),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::columns::derive_board;
    use crate::models::Task;

    fn task(id: &str, status: &str) -> Task {
        Task {
            id: id.to_string(),
            sprint_id: "s1".to_string(),
            project_id: None,
            title: format!("Task {id}"),
            description: None,
            status: TaskStatus::parse(status),
            assigned_to: None,
            priority: None,
            story_points: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn board() -> Board {
        derive_board(&[
            task("1", "todo"),
            task("2", "todo"),
            task("3", "in-progress"),
        ])
    }

    #[test]
    fn test_drop_outside_is_noop() {
        let b = board();
        let out = apply_drag(
            &b,
            &DragOp {
                task_id: "1".into(),
                source_column: "todo".into(),
                source_index: 0,
                dest: None,
            },
        );
        assert_eq!(out.board, b);
        assert!(out.status_change.is_none());
    }

    #[test]
    fn test_same_position_is_noop() {
        let b = board();
        let out = apply_drag(
            &b,
            &DragOp {
                task_id: "1".into(),
                source_column: "todo".into(),
                source_index: 0,
                dest: Some(DragTarget {
                    column: "todo".into(),
                    index: 0,
                }),
            },
        );
        assert_eq!(out.board, b);
        assert!(out.status_change.is_none());
    }

    #[test]
    fn test_same_column_reorder_has_no_status_change() {
        let b = board();
        let out = apply_drag(
            &b,
            &DragOp {
                task_id: "1".into(),
                source_column: "todo".into(),
                source_index: 0,
                dest: Some(DragTarget {
                    column: "todo".into(),
                    index: 1,
                }),
            },
        );
        assert_eq!(out.board.columns["todo"].task_ids, vec!["2", "1"]);
        assert_eq!(out.board.columns["in-progress"].task_ids, vec!["3"]);
        assert!(out.status_change.is_none());
    }

    #[test]
    fn test_cross_column_move_reports_status_change() {
        let b = board();
        let out = apply_drag(
            &b,
            &DragOp {
                task_id: "3".into(),
                source_column: "in-progress".into(),
                source_index: 0,
                dest: Some(DragTarget {
                    column: "done".into(),
                    index: 0,
                }),
            },
        );
        assert!(out.board.columns["in-progress"].task_ids.is_empty());
        assert_eq!(out.board.columns["done"].task_ids, vec!["3"]);
        // Untouched columns keep their contents.
        assert_eq!(out.board.columns["todo"].task_ids, vec!["1", "2"]);
        assert_eq!(
            out.status_change,
            Some(StatusChange {
                task_id: "3".into(),
                new_status: TaskStatus::Done,
            })
        );
    }

    #[test]
    fn test_cross_column_insert_at_index() {
        let b = board();
        let out = apply_drag(
            &b,
            &DragOp {
                task_id: "3".into(),
                source_column: "in-progress".into(),
                source_index: 0,
                dest: Some(DragTarget {
                    column: "todo".into(),
                    index: 1,
                }),
            },
        );
        assert_eq!(out.board.columns["todo"].task_ids, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_dest_index_clamped_to_length() {
        let b = board();
        let out = apply_drag(
            &b,
            &DragOp {
                task_id: "3".into(),
                source_column: "in-progress".into(),
                source_index: 0,
                dest: Some(DragTarget {
                    column: "todo".into(),
                    index: 99,
                }),
            },
        );
        assert_eq!(out.board.columns["todo"].task_ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_unknown_column_is_noop() {
        let b = board();
        let out = apply_drag(
            &b,
            &DragOp {
                task_id: "1".into(),
                source_column: "todo".into(),
                source_index: 0,
                dest: Some(DragTarget {
                    column: "nope".into(),
                    index: 0,
                }),
            },
        );
        assert_eq!(out.board, b);
        assert!(out.status_change.is_none());
    }

    #[test]
    fn test_move_to_custom_column_parses_custom_status() {
        let mut b = board();
        b.add_column("QA").unwrap();
        let out = apply_drag(
            &b,
            &DragOp {
                task_id: "1".into(),
                source_column: "todo".into(),
                source_index: 0,
                dest: Some(DragTarget {
                    column: "qa".into(),
                    index: 0,
                }),
            },
        );
        assert_eq!(
            out.status_change.unwrap().new_status,
            TaskStatus::Custom("qa".into())
        );
    }
}
