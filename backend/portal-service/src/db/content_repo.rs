use crate::models::{ContentCategory, ContentItem, ContentStatus, Tag};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE patterns
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Create a new content item in draft state
pub async fn insert_content(
    tx: &mut Transaction<'_, Postgres>,
    title: &str,
    body: &str,
    category: ContentCategory,
) -> Result<ContentItem, sqlx::Error> {
    let item = sqlx::query_as::<_, ContentItem>(
        r#"
        INSERT INTO content_items (title, body, category, status)
        VALUES ($1, $2, $3, 'draft')
        RETURNING id, title, body, category, status, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(body)
    .bind(category)
    .fetch_one(&mut **tx)
    .await?;

    Ok(item)
}

/// Find a content item by ID
pub async fn find_content_by_id(
    pool: &PgPool,
    content_id: Uuid,
) -> Result<Option<ContentItem>, sqlx::Error> {
    let item = sqlx::query_as::<_, ContentItem>(
        r#"
        SELECT id, title, body, category, status, created_at, updated_at
        FROM content_items
        WHERE id = $1
        "#,
    )
    .bind(content_id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Find a content item by ID inside a transaction
pub async fn find_content_by_id_tx(
    tx: &mut Transaction<'_, Postgres>,
    content_id: Uuid,
) -> Result<Option<ContentItem>, sqlx::Error> {
    let item = sqlx::query_as::<_, ContentItem>(
        r#"
        SELECT id, title, body, category, status, created_at, updated_at
        FROM content_items
        WHERE id = $1
        "#,
    )
    .bind(content_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(item)
}

/// Update title, body, and category of a content item
pub async fn update_content(
    tx: &mut Transaction<'_, Postgres>,
    content_id: Uuid,
    title: &str,
    body: &str,
    category: ContentCategory,
) -> Result<Option<ContentItem>, sqlx::Error> {
    let item = sqlx::query_as::<_, ContentItem>(
        r#"
        UPDATE content_items
        SET title = $1, body = $2, category = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING id, title, body, category, status, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(body)
    .bind(category)
    .bind(content_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(item)
}

/// Update the publish status of a content item
pub async fn update_content_status(
    tx: &mut Transaction<'_, Postgres>,
    content_id: Uuid,
    status: ContentStatus,
) -> Result<Option<ContentItem>, sqlx::Error> {
    let item = sqlx::query_as::<_, ContentItem>(
        r#"
        UPDATE content_items
        SET status = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, title, body, category, status, created_at, updated_at
        "#,
    )
    .bind(status)
    .bind(content_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(item)
}

/// Delete a content item (tag associations cascade)
pub async fn delete_content(pool: &PgPool, content_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
        .bind(content_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List content items, optionally filtered by category, status, or tag name
/// Returns items in descending order by last update
pub async fn list_content(
    pool: &PgPool,
    category: Option<ContentCategory>,
    status: Option<ContentStatus>,
    tag: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ContentItem>, sqlx::Error> {
    let items = sqlx::query_as::<_, ContentItem>(
        r#"
        SELECT c.id, c.title, c.body, c.category, c.status, c.created_at, c.updated_at
        FROM content_items c
        WHERE ($1::content_category IS NULL OR c.category = $1)
          AND ($2::content_status IS NULL OR c.status = $2)
          AND ($3::text IS NULL OR EXISTS (
                SELECT 1
                FROM content_item_tags ct
                JOIN tags t ON t.id = ct.tag_id
                WHERE ct.content_id = c.id AND LOWER(t.name) = LOWER($3)
          ))
        ORDER BY c.updated_at DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(category)
    .bind(status)
    .bind(tag)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Search published content by case-insensitive substring match against
/// title, body, or any associated tag name
pub async fn search_content(
    pool: &PgPool,
    query: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<ContentItem>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(query));

    let items = sqlx::query_as::<_, ContentItem>(
        r#"
        SELECT c.id, c.title, c.body, c.category, c.status, c.created_at, c.updated_at
        FROM content_items c
        WHERE c.status = 'published'
          AND (c.title ILIKE $1
               OR c.body ILIKE $1
               OR EXISTS (
                    SELECT 1
                    FROM content_item_tags ct
                    JOIN tags t ON t.id = ct.tag_id
                    WHERE ct.content_id = c.id AND t.name ILIKE $1
               ))
        ORDER BY c.updated_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Tags associated with a content item, ordered by name
pub async fn tags_for_content(pool: &PgPool, content_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.created_at
        FROM tags t
        JOIN content_item_tags ct ON ct.tag_id = t.id
        WHERE ct.content_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(content_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
