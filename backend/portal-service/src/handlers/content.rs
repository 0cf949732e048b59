/// Content handlers - HTTP endpoints for content items
use crate::error::Result;
use crate::handlers::{clamp_limit, clamp_offset};
use crate::models::{ContentCategory, ContentStatus};
use crate::services::ContentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateContentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub category: ContentCategory,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub category: ContentCategory,
}

#[derive(Debug, Deserialize)]
pub struct ListContentQuery {
    pub category: Option<ContentCategory>,
    pub status: Option<ContentStatus>,
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AttachTagRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Create a new draft content item
pub async fn create_content(
    pool: web::Data<PgPool>,
    req: web::Json<CreateContentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::new((**pool).clone());
    let detail = service
        .create_content(&req.title, &req.body, req.category, &req.tags)
        .await?;

    Ok(HttpResponse::Created().json(detail))
}

/// Get a content item with its tags
pub async fn get_content(
    pool: web::Data<PgPool>,
    content_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    let detail = service.get_content(*content_id).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// List content items with optional category/status/tag filters
pub async fn list_content(
    pool: web::Data<PgPool>,
    query: web::Query<ListContentQuery>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    let items = service
        .list_content(
            query.category,
            query.status,
            query.tag.as_deref(),
            clamp_limit(query.limit),
            clamp_offset(query.offset),
        )
        .await?;

    Ok(HttpResponse::Ok().json(items))
}

/// Edit a content item in any state
pub async fn update_content(
    pool: web::Data<PgPool>,
    content_id: web::Path<Uuid>,
    req: web::Json<UpdateContentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::new((**pool).clone());
    let detail = service
        .update_content(*content_id, &req.title, &req.body, req.category)
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Delete a content item
pub async fn delete_content(
    pool: web::Data<PgPool>,
    content_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    service.delete_content(*content_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Publish a draft
pub async fn publish_content(
    pool: web::Data<PgPool>,
    content_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    let detail = service.publish(*content_id).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Revert a published item to draft
pub async fn unpublish_content(
    pool: web::Data<PgPool>,
    content_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    let detail = service.unpublish(*content_id).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Search published content by substring (title, body, or tag name)
pub async fn search_content(
    pool: web::Data<PgPool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    let items = service
        .search(&query.q, clamp_limit(query.limit), clamp_offset(query.offset))
        .await?;

    Ok(HttpResponse::Ok().json(items))
}

/// Attach a tag to a content item
pub async fn attach_content_tag(
    pool: web::Data<PgPool>,
    content_id: web::Path<Uuid>,
    req: web::Json<AttachTagRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::new((**pool).clone());
    let detail = service.attach_tag(*content_id, &req.name).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Detach a tag from a content item
pub async fn detach_content_tag(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse> {
    let (content_id, name) = path.into_inner();

    let service = ContentService::new((**pool).clone());
    let detail = service.detach_tag(content_id, &name).await?;

    Ok(HttpResponse::Ok().json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_title() {
        let req = CreateContentRequest {
            title: String::new(),
            body: "text".into(),
            category: ContentCategory::TechnicalArticle,
            tags: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_request_parses_from_json() {
        let req: CreateContentRequest = serde_json::from_str(
            r#"{"title": "Hello", "category": "code-snippet", "tags": ["rust"]}"#,
        )
        .unwrap();
        assert_eq!(req.category, ContentCategory::CodeSnippet);
        assert_eq!(req.body, "");
        assert!(req.validate().is_ok());
    }
}
