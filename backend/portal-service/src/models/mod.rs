/// Data models for portal-service
///
/// - `content`: publishable content items with a fixed category set
/// - `project`: portfolio entries with milestone timelines
/// - `inquiry`: contact-form submissions tracked through a status lifecycle
/// - `tag`: shared labels attachable to content or projects
pub mod content;
pub mod inquiry;
pub mod project;
pub mod tag;

pub use content::{ContentCategory, ContentItem, ContentItemDetail, ContentStatus};
pub use inquiry::{Inquiry, InquiryStatus};
pub use project::{Project, ProjectDetail, ProjectMilestone};
pub use tag::{Tag, TagUsage};
