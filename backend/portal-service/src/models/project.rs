use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A portfolio entry
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub demo_url: Option<String>,
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A dated event on a project timeline
///
/// Timelines are stored and returned ordered by `milestone_date` ascending.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectMilestone {
    pub id: Uuid,
    pub project_id: Uuid,
    pub label: String,
    pub milestone_date: NaiveDate,
}

/// Project with its milestone timeline and tech-stack tags
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub milestones: Vec<ProjectMilestone>,
    pub tags: Vec<String>,
}
