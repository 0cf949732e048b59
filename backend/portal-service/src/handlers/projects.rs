/// Project handlers - HTTP endpoints for portfolio entries
use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::services::projects::MilestoneInput;
use crate::services::ProjectService;
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct MilestoneRequest {
    pub label: String,
    pub date: NaiveDate,
}

impl From<MilestoneRequest> for MilestoneInput {
    fn from(req: MilestoneRequest) -> Self {
        MilestoneInput {
            label: req.label,
            date: req.date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    pub demo_url: Option<String>,
    #[validate(url)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub milestones: Vec<MilestoneRequest>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    pub demo_url: Option<String>,
    #[validate(url)]
    pub source_url: Option<String>,
    /// When present, replaces the whole milestone timeline
    pub milestones: Option<Vec<MilestoneRequest>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AttachTagRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Create a portfolio project
pub async fn create_project(
    pool: web::Data<PgPool>,
    req: web::Json<CreateProjectRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let req = req.into_inner();

    let service = ProjectService::new((**pool).clone());
    let detail = service
        .create_project(
            &req.title,
            &req.description,
            req.demo_url.as_deref(),
            req.source_url.as_deref(),
            req.milestones.into_iter().map(Into::into).collect(),
            &req.tech_stack,
        )
        .await?;

    Ok(HttpResponse::Created().json(detail))
}

/// Get a project with milestones and tags
pub async fn get_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ProjectService::new((**pool).clone());
    let detail = service.get_project(*project_id).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// List projects, most recently updated first
pub async fn list_projects(
    pool: web::Data<PgPool>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = ProjectService::new((**pool).clone());
    let projects = service.list_projects(query.limit(), query.offset()).await?;

    Ok(HttpResponse::Ok().json(projects))
}

/// Update a project; a milestone list in the body replaces the timeline
pub async fn update_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<Uuid>,
    req: web::Json<UpdateProjectRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let req = req.into_inner();

    let service = ProjectService::new((**pool).clone());
    let detail = service
        .update_project(
            *project_id,
            &req.title,
            &req.description,
            req.demo_url.as_deref(),
            req.source_url.as_deref(),
            req.milestones
                .map(|list| list.into_iter().map(Into::into).collect()),
        )
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Delete a project
pub async fn delete_project(
    pool: web::Data<PgPool>,
    project_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ProjectService::new((**pool).clone());
    service.delete_project(*project_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Attach a tech-stack tag to a project
pub async fn attach_project_tag(
    pool: web::Data<PgPool>,
    project_id: web::Path<Uuid>,
    req: web::Json<AttachTagRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ProjectService::new((**pool).clone());
    let detail = service.attach_tag(*project_id, &req.name).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Detach a tech-stack tag from a project
pub async fn detach_project_tag(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse> {
    let (project_id, name) = path.into_inner();

    let service = ProjectService::new((**pool).clone());
    let detail = service.detach_tag(project_id, &name).await?;

    Ok(HttpResponse::Ok().json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_invalid_urls() {
        let req = CreateProjectRequest {
            title: "Portal".into(),
            description: String::new(),
            demo_url: Some("not a url".into()),
            source_url: None,
            milestones: vec![],
            tech_stack: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_request_parses_milestones() {
        let req: CreateProjectRequest = serde_json::from_str(
            r#"{
                "title": "Portal",
                "source_url": "https://github.com/example/portal",
                "milestones": [{"label": "Kickoff", "date": "2025-11-15"}],
                "tech_stack": ["Rust", "PostgreSQL"]
            }"#,
        )
        .unwrap();
        assert_eq!(req.milestones.len(), 1);
        assert_eq!(req.milestones[0].label, "Kickoff");
        assert!(req.validate().is_ok());
    }
}
