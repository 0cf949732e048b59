/// Tag service - the shared tag index
use crate::db::tag_repo;
use crate::error::Result;
use crate::models::TagUsage;
use sqlx::PgPool;

pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All tags with association counts, most used first
    pub async fn list_tags(&self) -> Result<Vec<TagUsage>> {
        let tags = tag_repo::list_tags_with_usage(&self.pool).await?;
        Ok(tags)
    }

    /// Delete tags with no remaining associations; returns how many were removed
    ///
    /// Orphaned tags are retained for reuse by default; pruning is an
    /// explicit admin action, not an automatic side effect of detach.
    pub async fn prune_unused(&self) -> Result<u64> {
        let removed = tag_repo::prune_unused_tags(&self.pool).await?;
        if removed > 0 {
            tracing::info!(removed, "pruned unused tags");
        }
        Ok(removed)
    }
}
