use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A shared label attachable to content items or projects
///
/// Names are unique case-insensitively. Tags outlive their owners: deleting
/// a content item or project detaches its tags without deleting them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Tag with its association count across content and projects
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TagUsage {
    pub id: Uuid,
    pub name: String,
    pub usage_count: i64,
}
