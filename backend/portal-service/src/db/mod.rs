/// Database access layer
///
/// Repository functions over the portal tables. Reads take a pool reference;
/// writes that participate in a service transaction take the transaction.
pub mod content_repo;
pub mod inquiry_repo;
pub mod project_repo;
pub mod tag_repo;
