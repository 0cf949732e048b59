/// Tag handlers - the shared tag index
use crate::error::Result;
use crate::services::TagService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// All tags with usage counts, most used first
pub async fn list_tags(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    let tags = service.list_tags().await?;

    Ok(HttpResponse::Ok().json(tags))
}

/// Delete tags with no remaining associations (explicit maintenance action)
pub async fn prune_tags(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    let removed = service.prune_unused().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "removed": removed })))
}
