/// Inquiry service - contact-form submissions and their status lifecycle
use crate::db::inquiry_repo;
use crate::error::{AppError, Result};
use crate::models::{Inquiry, InquiryStatus};
use crate::services::EmailService;
use sqlx::PgPool;
use uuid::Uuid;

/// Check an admin-triggered status change against the lifecycle rules
fn check_transition(from: InquiryStatus, to: InquiryStatus) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::InvalidStateTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}

pub struct InquiryService {
    pool: PgPool,
    email: EmailService,
}

impl InquiryService {
    pub fn new(pool: PgPool, email: EmailService) -> Self {
        Self { pool, email }
    }

    /// Record a contact-form submission with status "new"
    ///
    /// The received-notification is dispatched after the insert commits;
    /// dispatch failures are logged and never surfaced to the submitter.
    pub async fn submit(
        &self,
        submitter_name: &str,
        submitter_email: &str,
        message: &str,
    ) -> Result<Inquiry> {
        if message.trim().is_empty() {
            return Err(AppError::Validation("message must not be empty".into()));
        }

        let inquiry = inquiry_repo::insert_inquiry(
            &self.pool,
            submitter_name.trim(),
            submitter_email.trim(),
            message,
        )
        .await?;

        if let Err(err) = self.email.send_inquiry_received(&inquiry).await {
            tracing::warn!(inquiry_id = %inquiry.id, "inquiry notification failed: {}", err);
        }

        Ok(inquiry)
    }

    /// Admin-triggered status change
    ///
    /// Allowed only forward through `new -> in-review -> responded -> closed`
    /// (states may be skipped); `closed` is terminal.
    pub async fn transition(&self, inquiry_id: Uuid, target: InquiryStatus) -> Result<Inquiry> {
        let mut tx = self.pool.begin().await?;

        let current = inquiry_repo::find_inquiry_by_id_tx(&mut tx, inquiry_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("inquiry {}", inquiry_id)))?;

        check_transition(current.status, target)?;

        let inquiry = inquiry_repo::update_inquiry_status(&mut tx, inquiry_id, target)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("inquiry {}", inquiry_id)))?;

        tx.commit().await?;

        if let Err(err) = self
            .email
            .send_inquiry_status_changed(&inquiry, current.status)
            .await
        {
            tracing::warn!(inquiry_id = %inquiry.id, "status notification failed: {}", err);
        }

        Ok(inquiry)
    }

    /// Get an inquiry by ID
    pub async fn get_inquiry(&self, inquiry_id: Uuid) -> Result<Inquiry> {
        inquiry_repo::find_inquiry_by_id(&self.pool, inquiry_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("inquiry {}", inquiry_id)))
    }

    /// List inquiries, optionally filtered by status, newest first
    pub async fn list_inquiries(
        &self,
        status: Option<InquiryStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Inquiry>> {
        let inquiries = inquiry_repo::list_inquiries(&self.pool, status, limit, offset).await?;
        Ok(inquiries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InquiryStatus::*;

    #[test]
    fn forward_transitions_pass_the_check() {
        assert!(check_transition(New, InReview).is_ok());
        assert!(check_transition(New, Closed).is_ok());
        assert!(check_transition(Responded, Closed).is_ok());
    }

    #[test]
    fn closed_rejects_every_transition() {
        for target in [New, InReview, Responded, Closed] {
            let err = check_transition(Closed, target).unwrap_err();
            assert!(matches!(err, AppError::InvalidStateTransition { .. }));
        }
    }

    #[test]
    fn transition_error_names_both_states() {
        let err = check_transition(Closed, New).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status transition: closed -> new"
        );
    }
}
