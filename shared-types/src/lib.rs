//! Shared types between the dashboard server and its clients.
//!
//! Everything here crosses the HTTP boundary as JSON, so all types derive
//! serde and avoid anything that does not serialize cleanly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Terminal execution
// ============================================================================

/// Body of `POST /api/terminal/execute`.
///
/// `command` is required but modeled with a default so that an absent field
/// and an empty string take the same validation path (400, no spawn).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub command: String,
    /// Explicit working directory. When omitted the server falls back to
    /// its configured workspace path, then to its fallback directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

// ============================================================================
// Tasks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Next status in the toggle cycle: todo -> in-progress -> done -> todo.
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    #[serde(rename = "IS")]
    InsideSales,
    #[serde(rename = "FS")]
    FieldSales,
    Demo,
    Proposal,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// One tracked sales/demo task. Held only in server memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// ULID, assigned by the server on create.
    pub id: String,
    pub title: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default = "default_category")]
    pub category: TaskCategory,
    #[serde(default = "default_priority")]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<String>,
}

fn default_category() -> TaskCategory {
    TaskCategory::Other
}

fn default_priority() -> TaskPriority {
    TaskPriority::Medium
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<TaskCategory>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

// ============================================================================
// Reference links
// ============================================================================

/// One bookmarked reference link (Cosense page, runbook, etc).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLink {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
}

// ============================================================================
// Command catalog
// ============================================================================

/// One entry in the static catalog of predefined dashboard commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    pub id: String,
    pub name: String,
    pub description: String,
}
