/// HTTP handlers for portal endpoints
///
/// This module contains handlers for:
/// - Content: draft/publish lifecycle, search, tagging
/// - Projects: portfolio entries with milestone timelines
/// - Inquiries: contact-form submissions and status transitions
/// - Tags: shared tag index and maintenance
pub mod content;
pub mod inquiries;
pub mod projects;
pub mod tags;

use serde::Deserialize;

// Re-export handler functions at module level
pub use content::{
    attach_content_tag, create_content, delete_content, detach_content_tag, get_content,
    list_content, publish_content, search_content, unpublish_content, update_content,
};
pub use inquiries::{create_inquiry, get_inquiry, list_inquiries, update_inquiry_status};
pub use projects::{
    attach_project_tag, create_project, delete_project, detach_project_tag, get_project,
    list_projects, update_project,
};
pub use tags::{list_tags, prune_tags};

/// Limit/offset query parameters shared by list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    pub fn offset(&self) -> i64 {
        clamp_offset(self.offset)
    }
}

pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(20).clamp(1, 100)
}

pub(crate) fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamping() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            limit: Some(0),
            offset: Some(40),
        };
        assert_eq!(params.limit(), 1);
        assert_eq!(params.offset(), 40);
    }
}
