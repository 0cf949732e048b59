use crate::models::{Tag, TagUsage};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Find a tag by case-insensitive name
pub async fn find_tag_by_name(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, name, created_at
        FROM tags
        WHERE LOWER(name) = LOWER($1)
        "#,
    )
    .bind(name)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(tag)
}

/// Look up a tag by case-insensitive name, creating it if absent
///
/// The first spelling of a name wins; later attaches with different casing
/// reuse the stored tag.
pub async fn get_or_create_tag(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> Result<Tag, sqlx::Error> {
    if let Some(tag) = find_tag_by_name(tx, name).await? {
        return Ok(tag);
    }

    let inserted = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (name)
        VALUES ($1)
        ON CONFLICT ((LOWER(name))) DO NOTHING
        RETURNING id, name, created_at
        "#,
    )
    .bind(name)
    .fetch_optional(&mut **tx)
    .await?;

    match inserted {
        Some(tag) => Ok(tag),
        // Lost a race with a concurrent insert; the row exists now
        None => match find_tag_by_name(tx, name).await? {
            Some(tag) => Ok(tag),
            None => Err(sqlx::Error::RowNotFound),
        },
    }
}

/// Associate a tag with a content item (idempotent)
pub async fn attach_content_tag(
    tx: &mut Transaction<'_, Postgres>,
    content_id: Uuid,
    tag_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO content_item_tags (content_id, tag_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(content_id)
    .bind(tag_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Remove a content-tag association by case-insensitive tag name
pub async fn detach_content_tag(
    tx: &mut Transaction<'_, Postgres>,
    content_id: Uuid,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM content_item_tags ct
        USING tags t
        WHERE ct.tag_id = t.id
          AND ct.content_id = $1
          AND LOWER(t.name) = LOWER($2)
        "#,
    )
    .bind(content_id)
    .bind(name)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Associate a tag with a project (idempotent)
pub async fn attach_project_tag(
    tx: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    tag_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO project_tags (project_id, tag_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(project_id)
    .bind(tag_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Remove a project-tag association by case-insensitive tag name
pub async fn detach_project_tag(
    tx: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM project_tags pt
        USING tags t
        WHERE pt.tag_id = t.id
          AND pt.project_id = $1
          AND LOWER(t.name) = LOWER($2)
        "#,
    )
    .bind(project_id)
    .bind(name)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// All tags with their association counts, most used first
pub async fn list_tags_with_usage(pool: &PgPool) -> Result<Vec<TagUsage>, sqlx::Error> {
    let tags = sqlx::query_as::<_, TagUsage>(
        r#"
        SELECT t.id, t.name,
               (SELECT COUNT(*) FROM content_item_tags ct WHERE ct.tag_id = t.id)
             + (SELECT COUNT(*) FROM project_tags pt WHERE pt.tag_id = t.id) AS usage_count
        FROM tags t
        ORDER BY usage_count DESC, t.name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// Delete tags with no remaining associations
///
/// Orphaned tags are retained by default for reuse; this is the explicit
/// maintenance operation behind the admin prune endpoint.
pub async fn prune_unused_tags(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM tags t
        WHERE NOT EXISTS (SELECT 1 FROM content_item_tags ct WHERE ct.tag_id = t.id)
          AND NOT EXISTS (SELECT 1 FROM project_tags pt WHERE pt.tag_id = t.id)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
