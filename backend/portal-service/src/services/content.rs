/// Content service - handles drafting, publication, search, and tagging
use crate::db::{content_repo, tag_repo};
use crate::error::{AppError, Result};
use crate::models::{ContentCategory, ContentItem, ContentItemDetail, ContentStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Trim and reject empty tag names before they reach the index
pub(crate) fn normalize_tag_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("tag name must not be empty".into()));
    }
    if trimmed.len() > 100 {
        return Err(AppError::Validation(
            "tag name must be at most 100 characters".into(),
        ));
    }
    Ok(trimmed)
}

fn ensure_publishable(title: &str, body: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(
            "published content must have a non-empty title".into(),
        ));
    }
    if body.trim().is_empty() {
        return Err(AppError::Validation(
            "published content must have a non-empty body".into(),
        ));
    }
    Ok(())
}

pub struct ContentService {
    pool: PgPool,
}

impl ContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new draft, optionally with initial tags
    pub async fn create_content(
        &self,
        title: &str,
        body: &str,
        category: ContentCategory,
        tags: &[String],
    ) -> Result<ContentItemDetail> {
        let mut tx = self.pool.begin().await?;

        let item = content_repo::insert_content(&mut tx, title, body, category).await?;

        for name in tags {
            let name = normalize_tag_name(name)?;
            let tag = tag_repo::get_or_create_tag(&mut tx, name).await?;
            tag_repo::attach_content_tag(&mut tx, item.id, tag.id).await?;
        }

        tx.commit().await?;

        self.detail(item).await
    }

    /// Edit title, body, and category in any state
    ///
    /// A published item must stay publishable; the edit is rejected rather
    /// than silently unpublishing it.
    pub async fn update_content(
        &self,
        content_id: Uuid,
        title: &str,
        body: &str,
        category: ContentCategory,
    ) -> Result<ContentItemDetail> {
        let mut tx = self.pool.begin().await?;

        let current = content_repo::find_content_by_id_tx(&mut tx, content_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        if current.status == ContentStatus::Published {
            ensure_publishable(title, body)?;
        }

        let item = content_repo::update_content(&mut tx, content_id, title, body, category)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        tx.commit().await?;

        self.detail(item).await
    }

    /// Publish a draft; requires non-empty title and body
    ///
    /// Publishing an already-published item is a no-op.
    pub async fn publish(&self, content_id: Uuid) -> Result<ContentItemDetail> {
        let mut tx = self.pool.begin().await?;

        let current = content_repo::find_content_by_id_tx(&mut tx, content_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        if current.status == ContentStatus::Published {
            tx.commit().await?;
            return self.detail(current).await;
        }

        ensure_publishable(&current.title, &current.body)?;

        let item = content_repo::update_content_status(&mut tx, content_id, ContentStatus::Published)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        tx.commit().await?;

        self.detail(item).await
    }

    /// Revert a published item to draft
    pub async fn unpublish(&self, content_id: Uuid) -> Result<ContentItemDetail> {
        let mut tx = self.pool.begin().await?;

        let current = content_repo::find_content_by_id_tx(&mut tx, content_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        if current.status == ContentStatus::Draft {
            tx.commit().await?;
            return self.detail(current).await;
        }

        let item = content_repo::update_content_status(&mut tx, content_id, ContentStatus::Draft)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        tx.commit().await?;

        self.detail(item).await
    }

    /// Get a content item with its tags
    pub async fn get_content(&self, content_id: Uuid) -> Result<ContentItemDetail> {
        let item = content_repo::find_content_by_id(&self.pool, content_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        self.detail(item).await
    }

    /// List content items filtered by category, status, and/or tag name
    pub async fn list_content(
        &self,
        category: Option<ContentCategory>,
        status: Option<ContentStatus>,
        tag: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContentItem>> {
        let items =
            content_repo::list_content(&self.pool, category, status, tag, limit, offset).await?;
        Ok(items)
    }

    /// Delete a content item; tag associations cascade, tags survive
    pub async fn delete_content(&self, content_id: Uuid) -> Result<()> {
        let deleted = content_repo::delete_content(&self.pool, content_id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("content item {}", content_id)));
        }
        Ok(())
    }

    /// Search published content by substring against title, body, or tag names
    pub async fn search(&self, query: &str, limit: i64, offset: i64) -> Result<Vec<ContentItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("search query must not be empty".into()));
        }

        let items = content_repo::search_content(&self.pool, query, limit, offset).await?;
        Ok(items)
    }

    /// Attach a tag by name, creating the tag if needed (idempotent)
    pub async fn attach_tag(&self, content_id: Uuid, name: &str) -> Result<ContentItemDetail> {
        let name = normalize_tag_name(name)?;

        let mut tx = self.pool.begin().await?;

        let item = content_repo::find_content_by_id_tx(&mut tx, content_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        let tag = tag_repo::get_or_create_tag(&mut tx, name).await?;
        tag_repo::attach_content_tag(&mut tx, content_id, tag.id).await?;

        tx.commit().await?;

        self.detail(item).await
    }

    /// Detach a tag by name; the tag itself is retained for reuse
    ///
    /// Detaching an absent association is a no-op.
    pub async fn detach_tag(&self, content_id: Uuid, name: &str) -> Result<ContentItemDetail> {
        let mut tx = self.pool.begin().await?;

        let item = content_repo::find_content_by_id_tx(&mut tx, content_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content item {}", content_id)))?;

        tag_repo::detach_content_tag(&mut tx, content_id, name).await?;

        tx.commit().await?;

        self.detail(item).await
    }

    async fn detail(&self, item: ContentItem) -> Result<ContentItemDetail> {
        let tags = content_repo::tags_for_content(&self.pool, item.id)
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect();

        Ok(ContentItemDetail { item, tags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_are_trimmed_and_non_empty() {
        assert_eq!(normalize_tag_name("  rust  ").unwrap(), "rust");
        assert!(normalize_tag_name("   ").is_err());
        assert!(normalize_tag_name("").is_err());
        assert!(normalize_tag_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn publishable_requires_title_and_body() {
        assert!(ensure_publishable("Title", "Body").is_ok());
        assert!(matches!(
            ensure_publishable("", "Body"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            ensure_publishable("Title", "   "),
            Err(AppError::Validation(_))
        ));
    }
}
