/// Notification dispatcher for inquiry lifecycle events
use crate::config::EmailConfig;
use crate::error::{AppError, Result};
use crate::models::{Inquiry, InquiryStatus};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, warn};

/// Async email transport wrapper (SMTP or no-op)
///
/// Dispatch failures are the caller's to log; they are never retried and
/// never roll back the state change that triggered them.
#[derive(Clone)]
pub struct EmailService {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
    notify_to: Option<Mailbox>,
}

impl EmailService {
    /// Build email service from configuration
    ///
    /// If SMTP host is empty, operates in no-op mode (logs only).
    /// Useful for development and testing without email infrastructure.
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .map_err(|e| AppError::Internal(format!("Invalid SMTP_FROM address: {}", e)))?;

        let notify_to = match &config.notify_address {
            Some(addr) => Some(addr.parse::<Mailbox>().map_err(|e| {
                AppError::Internal(format!("Invalid INQUIRY_NOTIFY_ADDRESS: {}", e))
            })?),
            None => None,
        };

        let transport = if config.smtp_host.trim().is_empty() {
            warn!("SMTP host not configured; email service will operate in no-op mode");
            None
        } else {
            let builder = if config.use_starttls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            }
            .map_err(|e| AppError::Internal(format!("Failed to configure SMTP transport: {}", e)))?
            .port(config.smtp_port);

            let builder = if let (Some(username), Some(password)) =
                (&config.smtp_username, &config.smtp_password)
            {
                builder.credentials(Credentials::new(username.to_string(), password.to_string()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self {
            transport,
            from,
            notify_to,
        })
    }

    /// Check if SMTP transport is enabled
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some() && self.notify_to.is_some()
    }

    /// Notify the admin address that a new inquiry arrived
    pub async fn send_inquiry_received(&self, inquiry: &Inquiry) -> Result<()> {
        let subject = format!("New inquiry from {}", inquiry.submitter_name);
        let body = format!(
            "A new inquiry was submitted.\n\n\
             From: {} <{}>\n\
             Inquiry ID: {}\n\n\
             {}\n",
            inquiry.submitter_name, inquiry.submitter_email, inquiry.id, inquiry.message
        );
        self.send_mail(&subject, &body).await
    }

    /// Notify the admin address that an inquiry changed status
    pub async fn send_inquiry_status_changed(
        &self,
        inquiry: &Inquiry,
        previous: InquiryStatus,
    ) -> Result<()> {
        let subject = format!(
            "Inquiry from {} moved to {}",
            inquiry.submitter_name,
            inquiry.status.as_str()
        );
        let body = format!(
            "Inquiry {} changed status: {} -> {}\n\n\
             From: {} <{}>\n",
            inquiry.id,
            previous.as_str(),
            inquiry.status.as_str(),
            inquiry.submitter_name,
            inquiry.submitter_email
        );
        self.send_mail(&subject, &body).await
    }

    async fn send_mail(&self, subject: &str, body: &str) -> Result<()> {
        let (Some(transport), Some(to)) = (&self.transport, &self.notify_to) else {
            info!(subject = %subject, "Email dispatch skipped (no-op mode)");
            return Ok(());
        };

        let message = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        info!(to = %to, subject = %subject, "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn noop_config() -> EmailConfig {
        EmailConfig {
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            smtp_from: "Portal <no-reply@localhost>".to_string(),
            notify_address: Some("admin@example.com".to_string()),
            use_starttls: true,
        }
    }

    fn sample_inquiry() -> Inquiry {
        Inquiry {
            id: Uuid::new_v4(),
            submitter_name: "Ada".to_string(),
            submitter_email: "ada@example.com".to_string(),
            message: "Interested in a collaboration.".to_string(),
            status: InquiryStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn noop_mode_reports_success_without_transport() {
        let service = EmailService::new(&noop_config()).unwrap();
        assert!(!service.is_enabled());

        let inquiry = sample_inquiry();
        service.send_inquiry_received(&inquiry).await.unwrap();
        service
            .send_inquiry_status_changed(&inquiry, InquiryStatus::New)
            .await
            .unwrap();
    }

    #[test]
    fn invalid_from_address_is_rejected() {
        let mut config = noop_config();
        config.smtp_from = "not an address".to_string();
        assert!(EmailService::new(&config).is_err());
    }
}
