/// Business logic layer
///
/// Services own transactions and lifecycle rules; handlers stay thin.
pub mod content;
pub mod email;
pub mod inquiries;
pub mod projects;
pub mod tags;

pub use content::ContentService;
pub use email::EmailService;
pub use inquiries::InquiryService;
pub use projects::ProjectService;
pub use tags::TagService;
