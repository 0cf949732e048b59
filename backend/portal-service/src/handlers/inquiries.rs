/// Inquiry handlers - HTTP endpoints for contact-form submissions
use crate::error::Result;
use crate::handlers::{clamp_limit, clamp_offset};
use crate::models::InquiryStatus;
use crate::services::{EmailService, InquiryService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInquiryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInquiryStatusRequest {
    pub status: InquiryStatus,
}

#[derive(Debug, Deserialize)]
pub struct ListInquiriesQuery {
    pub status: Option<InquiryStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Record a contact-form submission
pub async fn create_inquiry(
    pool: web::Data<PgPool>,
    email: web::Data<EmailService>,
    req: web::Json<CreateInquiryRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = InquiryService::new((**pool).clone(), email.get_ref().clone());
    let inquiry = service.submit(&req.name, &req.email, &req.message).await?;

    Ok(HttpResponse::Created().json(inquiry))
}

/// Get an inquiry by ID
pub async fn get_inquiry(
    pool: web::Data<PgPool>,
    email: web::Data<EmailService>,
    inquiry_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = InquiryService::new((**pool).clone(), email.get_ref().clone());
    let inquiry = service.get_inquiry(*inquiry_id).await?;

    Ok(HttpResponse::Ok().json(inquiry))
}

/// List inquiries, optionally filtered by status
pub async fn list_inquiries(
    pool: web::Data<PgPool>,
    email: web::Data<EmailService>,
    query: web::Query<ListInquiriesQuery>,
) -> Result<HttpResponse> {
    let service = InquiryService::new((**pool).clone(), email.get_ref().clone());
    let inquiries = service
        .list_inquiries(
            query.status,
            clamp_limit(query.limit),
            clamp_offset(query.offset),
        )
        .await?;

    Ok(HttpResponse::Ok().json(inquiries))
}

/// Admin-triggered status transition
pub async fn update_inquiry_status(
    pool: web::Data<PgPool>,
    email: web::Data<EmailService>,
    inquiry_id: web::Path<Uuid>,
    req: web::Json<UpdateInquiryStatusRequest>,
) -> Result<HttpResponse> {
    let service = InquiryService::new((**pool).clone(), email.get_ref().clone());
    let inquiry = service.transition(*inquiry_id, req.status).await?;

    Ok(HttpResponse::Ok().json(inquiry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_email_is_rejected() {
        let req = CreateInquiryRequest {
            name: "Ada".into(),
            email: "not-an-email".into(),
            message: "Hello".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_message_is_rejected() {
        let req = CreateInquiryRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn plausible_submission_passes_validation() {
        let req = CreateInquiryRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Interested in a collaboration.".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn status_request_parses_kebab_case() {
        let req: UpdateInquiryStatusRequest =
            serde_json::from_str(r#"{"status": "in-review"}"#).unwrap();
        assert_eq!(req.status, InquiryStatus::InReview);
    }
}
