/// Portal Service Library
///
/// Backend for a personal content portal: blog/snippet content, portfolio
/// projects, contact-form inquiries, and a shared tag index.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and request/response DTOs
/// - `models`: Data structures for content, projects, inquiries, tags
/// - `services`: Business logic layer (transactions, lifecycle rules)
/// - `db`: Database access layer and repositories
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
