use crate::models::{Inquiry, InquiryStatus};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Create a new inquiry with status "new"
pub async fn insert_inquiry(
    pool: &PgPool,
    submitter_name: &str,
    submitter_email: &str,
    message: &str,
) -> Result<Inquiry, sqlx::Error> {
    let inquiry = sqlx::query_as::<_, Inquiry>(
        r#"
        INSERT INTO inquiries (submitter_name, submitter_email, message, status)
        VALUES ($1, $2, $3, 'new')
        RETURNING id, submitter_name, submitter_email, message, status, created_at, updated_at
        "#,
    )
    .bind(submitter_name)
    .bind(submitter_email)
    .bind(message)
    .fetch_one(pool)
    .await?;

    Ok(inquiry)
}

/// Find an inquiry by ID
pub async fn find_inquiry_by_id(
    pool: &PgPool,
    inquiry_id: Uuid,
) -> Result<Option<Inquiry>, sqlx::Error> {
    let inquiry = sqlx::query_as::<_, Inquiry>(
        r#"
        SELECT id, submitter_name, submitter_email, message, status, created_at, updated_at
        FROM inquiries
        WHERE id = $1
        "#,
    )
    .bind(inquiry_id)
    .fetch_optional(pool)
    .await?;

    Ok(inquiry)
}

/// Find an inquiry by ID inside a transaction
pub async fn find_inquiry_by_id_tx(
    tx: &mut Transaction<'_, Postgres>,
    inquiry_id: Uuid,
) -> Result<Option<Inquiry>, sqlx::Error> {
    let inquiry = sqlx::query_as::<_, Inquiry>(
        r#"
        SELECT id, submitter_name, submitter_email, message, status, created_at, updated_at
        FROM inquiries
        WHERE id = $1
        "#,
    )
    .bind(inquiry_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(inquiry)
}

/// List inquiries, optionally filtered by status, newest first
pub async fn list_inquiries(
    pool: &PgPool,
    status: Option<InquiryStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Inquiry>, sqlx::Error> {
    let inquiries = sqlx::query_as::<_, Inquiry>(
        r#"
        SELECT id, submitter_name, submitter_email, message, status, created_at, updated_at
        FROM inquiries
        WHERE ($1::inquiry_status IS NULL OR status = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(inquiries)
}

/// Update inquiry status
pub async fn update_inquiry_status(
    tx: &mut Transaction<'_, Postgres>,
    inquiry_id: Uuid,
    status: InquiryStatus,
) -> Result<Option<Inquiry>, sqlx::Error> {
    let inquiry = sqlx::query_as::<_, Inquiry>(
        r#"
        UPDATE inquiries
        SET status = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, submitter_name, submitter_email, message, status, created_at, updated_at
        "#,
    )
    .bind(status)
    .bind(inquiry_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(inquiry)
}
