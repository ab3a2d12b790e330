use serde::{Deserialize, Serialize};

/// Sentinel sprint id for tasks that have not been scheduled into a sprint.
pub const BACKLOG_SPRINT: &str = "backlog";

/// Task status. The three board defaults plus `review` and `backlog`, and an
/// open vocabulary of user-created column tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    Backlog,
    Custom(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::Backlog => "backlog",
            Self::Custom(token) => token,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "todo" => Self::Todo,
            "in-progress" => Self::InProgress,
            "review" => Self::Review,
            "done" => Self::Done,
            "backlog" => Self::Backlog,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Real sprint id, or [`BACKLOG_SPRINT`] for unscheduled tasks.
    pub sprint_id: String,
    /// Direct project link, used for backlog tasks that have no sprint.
    pub project_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assigned_to: Option<String>,
    pub priority: Option<Priority>,
    pub story_points: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    /// Whether this task belongs to the backlog of `project_id`.
    ///
    /// Canonical rule: explicit backlog sprint, or a backlog-status task
    /// linked straight to the project.
    pub fn in_backlog_of(&self, project_id: &str) -> bool {
        self.sprint_id == BACKLOG_SPRINT
            || (self.status == TaskStatus::Backlog && self.sprint_id == project_id)
    }
}
