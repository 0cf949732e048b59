use crate::models::{Project, ProjectMilestone, Tag};
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Create a new project
pub async fn insert_project(
    tx: &mut Transaction<'_, Postgres>,
    title: &str,
    description: &str,
    demo_url: Option<&str>,
    source_url: Option<&str>,
) -> Result<Project, sqlx::Error> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (title, description, demo_url, source_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, description, demo_url, source_url, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(demo_url)
    .bind(source_url)
    .fetch_one(&mut **tx)
    .await?;

    Ok(project)
}

/// Find a project by ID
pub async fn find_project_by_id(
    pool: &PgPool,
    project_id: Uuid,
) -> Result<Option<Project>, sqlx::Error> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, title, description, demo_url, source_url, created_at, updated_at
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(project_id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// List projects, most recently updated first
pub async fn list_projects(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Project>, sqlx::Error> {
    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, title, description, demo_url, source_url, created_at, updated_at
        FROM projects
        ORDER BY updated_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// Update a project's fields
pub async fn update_project(
    tx: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    title: &str,
    description: &str,
    demo_url: Option<&str>,
    source_url: Option<&str>,
) -> Result<Option<Project>, sqlx::Error> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET title = $1, description = $2, demo_url = $3, source_url = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING id, title, description, demo_url, source_url, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(demo_url)
    .bind(source_url)
    .bind(project_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(project)
}

/// Delete a project (milestones and tag associations cascade)
pub async fn delete_project(pool: &PgPool, project_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Replace the milestone set for a project
///
/// Callers pass milestones already sorted by date; insertion order is not
/// relied upon for reads, which always order by date.
pub async fn replace_milestones(
    tx: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    milestones: &[(String, NaiveDate)],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM project_milestones WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut **tx)
        .await?;

    for (label, date) in milestones {
        sqlx::query(
            r#"
            INSERT INTO project_milestones (project_id, label, milestone_date)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(project_id)
        .bind(label)
        .bind(date)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Milestones for a project, ordered by date ascending
pub async fn milestones_for_project(
    pool: &PgPool,
    project_id: Uuid,
) -> Result<Vec<ProjectMilestone>, sqlx::Error> {
    let milestones = sqlx::query_as::<_, ProjectMilestone>(
        r#"
        SELECT id, project_id, label, milestone_date
        FROM project_milestones
        WHERE project_id = $1
        ORDER BY milestone_date ASC, label ASC
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(milestones)
}

/// Tags associated with a project, ordered by name
pub async fn tags_for_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.created_at
        FROM tags t
        JOIN project_tags pt ON pt.tag_id = t.id
        WHERE pt.project_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
