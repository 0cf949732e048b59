use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Inquiry lifecycle state, matching the database `inquiry_status` enum
///
/// Transitions move forward only: `new -> in-review -> responded -> closed`.
/// States may be skipped, but `closed` is terminal and nothing re-opens
/// automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "inquiry_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum InquiryStatus {
    New,
    InReview,
    Responded,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::InReview => "in-review",
            InquiryStatus::Responded => "responded",
            InquiryStatus::Closed => "closed",
        }
    }

    /// Position in the lifecycle order
    fn rank(self) -> u8 {
        match self {
            InquiryStatus::New => 0,
            InquiryStatus::InReview => 1,
            InquiryStatus::Responded => 2,
            InquiryStatus::Closed => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, InquiryStatus::Closed)
    }

    /// Whether an admin-triggered transition to `target` is legal
    pub fn can_transition_to(self, target: InquiryStatus) -> bool {
        !self.is_terminal() && target.rank() > self.rank()
    }
}

/// A contact-form submission
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Inquiry {
    pub id: Uuid,
    pub submitter_name: String,
    pub submitter_email: String,
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use InquiryStatus::*;

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(New.can_transition_to(InReview));
        assert!(New.can_transition_to(Responded));
        assert!(New.can_transition_to(Closed));
        assert!(InReview.can_transition_to(Responded));
        assert!(InReview.can_transition_to(Closed));
        assert!(Responded.can_transition_to(Closed));
    }

    #[test]
    fn closed_is_terminal() {
        for target in [New, InReview, Responded, Closed] {
            assert!(!Closed.can_transition_to(target));
        }
        assert!(Closed.is_terminal());
    }

    #[test]
    fn backward_and_same_state_transitions_are_rejected() {
        assert!(!InReview.can_transition_to(New));
        assert!(!Responded.can_transition_to(InReview));
        assert!(!Responded.can_transition_to(New));
        assert!(!New.can_transition_to(New));
        assert!(!InReview.can_transition_to(InReview));
    }

    #[test]
    fn status_serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&InquiryStatus::InReview).unwrap(),
            "\"in-review\""
        );
        let parsed: InquiryStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(parsed, Closed);
    }
}
